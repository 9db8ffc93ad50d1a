use crate::support::{badge::BadgeCollection, badge::BadgeCollectionClient, deploy, inspect, Fault, CENT};
use activity_interface::{ChallengeHandle, ForfeitPolicy, IncentiveKind, NftPolicy, Verdict};
use activity_registry::RegistryError;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

#[test]
fn test_weekly_deposit_challenge_end_to_end() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    let creator = Address::generate(&env);
    let title = String::from_str(&env, "Seven day streak");

    let created = protocol.factory.create_deposit_challenge(
        &creator,
        &title,
        &String::from_str(&env, "Check in once a day"),
        &CENT,
        &7,
        &10,
        &true,
    );
    let instance_id = created.instance.instance_id;

    let participants = [
        protocol.funded(&env, CENT),
        protocol.funded(&env, CENT),
        protocol.funded(&env, CENT),
    ];
    for participant in participants.iter() {
        protocol.host.join(&instance_id, participant, &CENT);
    }
    assert_eq!(protocol.token.balance(&protocol.host.address), 3 * CENT);

    for participant in participants.iter() {
        for _ in 0..7 {
            protocol.host.advance_round(&instance_id, participant);
        }
    }
    assert_eq!(protocol.host.get_state(&instance_id).current_round, 7);

    for participant in participants.iter() {
        let refunded = protocol
            .host
            .settle(&instance_id, participant, participant, &Verdict::Completed);
        assert_eq!(refunded, CENT);
        assert_eq!(protocol.token.balance(participant), CENT);
    }

    let state = protocol.host.get_state(&instance_id);
    assert_eq!(state.participant_count, 3);
    assert_eq!(state.settled_count, 3);
    assert_eq!(state.custody_balance, 0);

    assert_eq!(protocol.registry.count(), 1);
    let metadata = protocol.registry.get_metadata(&1);
    assert_eq!(metadata.title, title);
    assert_eq!(metadata.instance, created.instance);
}

#[test]
fn test_factory_reports_registry_it_was_built_with() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);

    assert_eq!(
        protocol.factory.registry_handle(),
        protocol.registry.address
    );

    // A factory pointed at another registry is detectable
    let other = deploy(&env, ForfeitPolicy::Retain);
    assert_ne!(other.factory.registry_handle(), protocol.registry.address);
}

#[test]
fn test_creation_bumps_count_by_one() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    let creator = Address::generate(&env);

    for expected in 1..=4u64 {
        let before = protocol.registry.count();
        let created = protocol.factory.create_deposit_challenge(
            &creator,
            &String::from_str(&env, "Run"),
            &String::from_str(&env, ""),
            &CENT,
            &3,
            &5,
            &true,
        );
        assert_eq!(created.activity_id, expected);
        assert_eq!(protocol.registry.count(), before + 1);
        assert_eq!(
            protocol.registry.get_metadata(&created.activity_id).instance,
            created.instance
        );
    }

    let count = protocol.registry.count();
    assert_eq!(
        protocol.registry.try_get_metadata(&0),
        Err(Ok(RegistryError::NotFound))
    );
    assert_eq!(
        protocol.registry.try_get_metadata(&(count + 1)),
        Err(Ok(RegistryError::NotFound))
    );
    assert!(inspect(&env, &protocol.registry).is_empty());
}

#[test]
fn test_deposit_and_nft_factories_share_one_registry() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    let nft_factory = protocol.add_factory(&env, ForfeitPolicy::Retain);
    let collection_id = env.register(BadgeCollection, ());
    let collection = BadgeCollectionClient::new(&env, &collection_id);
    let creator = Address::generate(&env);

    let deposit = protocol.factory.create_deposit_challenge(
        &creator,
        &String::from_str(&env, "Swim"),
        &String::from_str(&env, ""),
        &CENT,
        &1,
        &5,
        &true,
    );
    let nft = nft_factory.create_nft_challenge(
        &creator,
        &String::from_str(&env, "Read"),
        &String::from_str(&env, ""),
        &collection_id,
        &NftPolicy::OnCompletion,
        &1,
        &5,
        &true,
    );

    assert_eq!(deposit.activity_id, 1);
    assert_eq!(nft.activity_id, 2);
    assert_eq!(protocol.factory.get_all_activities().len(), 1);
    assert_eq!(nft_factory.get_all_activities().len(), 1);
    assert_eq!(
        protocol.registry.get_metadata(&2).incentive_kind,
        IncentiveKind::Nft
    );

    let reader = Address::generate(&env);
    let instance_id = nft.instance.instance_id;
    protocol.host.join(&instance_id, &reader, &0);
    protocol.host.advance_round(&instance_id, &reader);
    protocol
        .host
        .settle(&instance_id, &reader, &reader, &Verdict::Completed);

    let badge = protocol.host.get_participant(&instance_id, &reader).badge;
    assert_eq!(badge, Some(1));
    assert_eq!(collection.owner_of(&1), Some(reader));
    assert!(inspect(&env, &protocol.registry).is_empty());
}

#[test]
fn test_inspection_reports_dangling_rows_and_continues() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    let creator = Address::generate(&env);

    protocol.factory.create_deposit_challenge(
        &creator,
        &String::from_str(&env, "Walk"),
        &String::from_str(&env, ""),
        &CENT,
        &2,
        &5,
        &true,
    );

    // A misbehaving factory indexes a handle nothing was opened for
    let rogue = Address::generate(&env);
    protocol.registry.authorize_factory(&protocol.admin, &rogue);
    let dangling = ChallengeHandle {
        host: protocol.host.address.clone(),
        instance_id: 99,
    };
    protocol.registry.register(
        &rogue,
        &creator,
        &String::from_str(&env, "Ghost"),
        &String::from_str(&env, ""),
        &true,
        &IncentiveKind::Deposit,
        &dangling,
    );

    protocol.factory.create_deposit_challenge(
        &creator,
        &String::from_str(&env, "Cycle"),
        &String::from_str(&env, ""),
        &CENT,
        &2,
        &5,
        &true,
    );

    let faults = inspect(&env, &protocol.registry);
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0], (2, Fault::MissingInstance(dangling)));
    assert_eq!(protocol.registry.count(), 3);
}

#[test]
fn test_failed_registration_leaves_no_orphan() {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    protocol
        .registry
        .revoke_factory(&protocol.admin, &protocol.factory.address);

    let result = protocol.factory.try_create_deposit_challenge(
        &Address::generate(&env),
        &String::from_str(&env, "Walk"),
        &String::from_str(&env, ""),
        &CENT,
        &2,
        &5,
        &true,
    );
    assert!(result.is_err());
    assert!(!protocol.host.exists(&1));
    assert_eq!(protocol.registry.count(), 0);
    assert_eq!(protocol.factory.activity_count(), 0);
}

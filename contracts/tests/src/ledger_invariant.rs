use crate::support::{deploy, Protocol, CENT};
use activity_interface::{ForfeitPolicy, Verdict};
use rand::{rngs::StdRng, Rng, SeedableRng};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

const ROUNDS: u32 = 3;
const CAPACITY: u32 = 4;
const STEPS: usize = 400;

struct Challenge {
    instance_id: u64,
    creator: Address,
    arbiter: Address,
}

fn open(env: &Env, protocol: &Protocol, policy: ForfeitPolicy) -> Challenge {
    let creator = Address::generate(env);
    protocol.factory.set_forfeit_policy(&protocol.admin, &policy);
    let created = protocol.factory.create_deposit_challenge(
        &creator,
        &String::from_str(env, "Fuzz"),
        &String::from_str(env, ""),
        &CENT,
        &ROUNDS,
        &CAPACITY,
        &true,
    );
    Challenge {
        instance_id: created.instance.instance_id,
        arbiter: protocol.host.get_config(&created.instance.instance_id).arbiter,
        creator,
    }
}

/// Drive random join/advance/settle/claim/sweep calls against several
/// instances and check the custody books after every call.
fn run(seed: u64) {
    let env = Env::default();
    env.mock_all_auths();

    let protocol = deploy(&env, ForfeitPolicy::Retain);
    protocol
        .factory
        .set_arbiter(&protocol.admin, &Some(Address::generate(&env)));
    let challenges = [
        open(&env, &protocol, ForfeitPolicy::Retain),
        open(&env, &protocol, ForfeitPolicy::Redistribute),
        open(&env, &protocol, ForfeitPolicy::ReturnToCreator),
    ];
    let accounts: std::vec::Vec<Address> =
        (0..6).map(|_| protocol.funded(&env, 10 * CENT)).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut refunds: std::vec::Vec<(u64, Address, i128)> = std::vec::Vec::new();

    for _ in 0..STEPS {
        let challenge = &challenges[rng.gen_range(0..challenges.len())];
        let account = &accounts[rng.gen_range(0..accounts.len())];
        let id = challenge.instance_id;

        let before = protocol.host.get_custody(&id);
        let succeeded = match rng.gen_range(0..6) {
            0 => protocol.host.try_join(&id, account, &CENT).is_ok(),
            1 | 2 => protocol.host.try_advance_round(&id, account).is_ok(),
            3 => match protocol
                .host
                .try_settle(&id, account, account, &Verdict::Completed)
            {
                Ok(Ok(refunded)) => {
                    let paid: i128 = refunds
                        .iter()
                        .filter(|(instance, who, _)| *instance == id && who == account)
                        .map(|(_, _, amount)| amount)
                        .sum();
                    assert!(paid + refunded <= CENT);
                    refunds.push((id, account.clone(), refunded));
                    true
                }
                _ => false,
            },
            4 => protocol
                .host
                .try_settle(&id, &challenge.arbiter, account, &Verdict::Failed)
                .is_ok(),
            _ => {
                protocol.host.try_claim_share(&id, account).is_ok()
                    || protocol.host.try_sweep_forfeits(&id, &challenge.creator).is_ok()
            }
        };

        let after = protocol.host.get_custody(&id);
        if !succeeded {
            assert_eq!(before, after);
        }
        assert!(after.total_out <= after.total_in);
        assert!(after.distributed <= after.forfeited);

        let state = protocol.host.get_state(&id);
        for participant in protocol.host.get_participants(&id).iter() {
            let record = protocol.host.get_participant(&id, &participant);
            assert!(record.rounds_completed <= ROUNDS);
            if !record.settled {
                assert!(state.current_round <= record.rounds_completed);
            }
        }
    }

    let held: i128 = challenges
        .iter()
        .map(|challenge| protocol.host.get_custody(&challenge.instance_id).balance())
        .sum();
    assert_eq!(protocol.token.balance(&protocol.host.address), held);
}

#[test]
fn test_custody_never_pays_out_more_than_it_took_in() {
    for seed in [1, 7, 42] {
        run(seed);
    }
}

//! Value movements in and out of an instance's custody.
//!
//! Every movement is mirrored in the instance's [`Custody`] totals, and no
//! instance may ever pay out more than it has taken in.

use crate::errors::ChallengeError;
use crate::storage::Custody;
use soroban_sdk::{token::TokenClient, Address, Env};

/// Move `amount` of `token` from `from` into the host's custody.
pub fn transfer_in(
    env: &Env,
    token: &Address,
    custody: &mut Custody,
    from: &Address,
    amount: i128,
) -> Result<(), ChallengeError> {
    if amount < 0 {
        return Err(ChallengeError::InvalidParameters);
    }
    let total_in = custody
        .total_in
        .checked_add(amount)
        .ok_or(ChallengeError::Overflow)?;

    let client = TokenClient::new(env, token);
    if client.balance(from) < amount {
        return Err(ChallengeError::InsufficientFunds);
    }
    client.transfer(from, &env.current_contract_address(), &amount);

    custody.total_in = total_in;
    Ok(())
}

/// Move `amount` of `token` out of the host's custody to `to`.
pub fn transfer_out(
    env: &Env,
    token: &Address,
    custody: &mut Custody,
    to: &Address,
    amount: i128,
) -> Result<(), ChallengeError> {
    if amount < 0 {
        return Err(ChallengeError::InvalidParameters);
    }
    let total_out = custody
        .total_out
        .checked_add(amount)
        .ok_or(ChallengeError::Overflow)?;

    // Cumulative out may never pass cumulative in.
    if total_out > custody.total_in {
        return Err(ChallengeError::InsufficientCustody);
    }

    let client = TokenClient::new(env, token);
    client.transfer(&env.current_contract_address(), to, &amount);

    custody.total_out = total_out;
    Ok(())
}

#![cfg(test)]
extern crate std;


mod protocol;
mod ledger_invariant;

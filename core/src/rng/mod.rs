//! Deterministic random number generation
//!
//! Uses the classic 48-bit linear congruential algorithm of `java.util.Random`
//! so that shuffles reproduce a known reference sequence bit-for-bit given the
//! same seed. CRITICAL: every shuffle in the graph module MUST go through
//! this module; no other source of randomness is permitted.

mod javarand;

pub use javarand::JavaRandom;

use crate::domain::model::{ReductionChain, MASTER_NUMBERS};

pub fn digit_sum(n: u32) -> u32 {
    let mut rest = n;
    let mut sum = 0;
    while rest > 0 {
        sum += rest % 10;
        rest /= 10;
    }
    sum
}

pub fn is_master(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

/// Reduces `n` by repeated digit sums, stopping at a single digit or a
/// master number. The chain starts with `n` itself.
pub fn reduce(n: u32) -> ReductionChain {
    let mut current = n;
    let mut chain = vec![current];
    while current > 9 && !is_master(current) {
        current = digit_sum(current);
        chain.push(current);
    }
    ReductionChain::from_steps(chain)
}

/// Reduces all the way down to 0..=9, masters included.
pub fn digit_root(n: u32) -> u32 {
    let mut current = n;
    while current > 9 {
        current = digit_sum(current);
    }
    current
}

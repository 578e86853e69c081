//! Bottom-up dynamic programming with one step per table write.
//!
//! Every step carries a full copy of the table so a viewer can show it cell
//! by cell.

use serde::{Deserialize, Serialize};

use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;

/// Tabulation state. Linear tables use `None` for "unreachable / infinity".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "cells", rename_all = "lowercase")]
pub enum DpTable {
    Linear(Vec<Option<u64>>),
    Grid(Vec<Vec<u64>>),
}

impl Default for DpTable {
    fn default() -> Self {
        DpTable::Linear(Vec::new())
    }
}

/// Cell written by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Index(usize),
    Cell(usize, usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpStep {
    pub table: DpTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Focus>,
}

impl DpStep {
    fn linear(cells: &[Option<u64>], focus: Option<usize>) -> Self {
        Self {
            table: DpTable::Linear(cells.to_vec()),
            focus: focus.map(Focus::Index),
        }
    }

    fn grid(cells: &[Vec<u64>], focus: Option<(usize, usize)>) -> Self {
        Self {
            table: DpTable::Grid(cells.to_vec()),
            focus: focus.map(|(i, j)| Focus::Cell(i, j)),
        }
    }
}

/// Largest index whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_INDEX: u64 = 93;

/// `F(n)` by tabulation. The table stops at `F(93)`; any larger `n` ends
/// with a single saturated step and returns `u64::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fibonacci;

impl TracedAlgorithm for Fibonacci {
    type Input = u64;
    type Output = u64;
    type Step = DpStep;

    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn execute(&self, n: &u64, rec: &mut Recorder<DpStep>) -> u64 {
        let requested = *n;
        let n = requested.min(MAX_FIBONACCI_INDEX) as usize;
        match n {
            0 => {
                rec.record("Base case: F(0) = 0", DpStep::linear(&[Some(0)], Some(0)));
                return 0;
            }
            1 => {
                rec.record(
                    "Base case: F(1) = 1",
                    DpStep::linear(&[Some(0), Some(1)], Some(1)),
                );
                return 1;
            }
            _ => {}
        }

        let mut dp: Vec<u64> = Vec::with_capacity(n + 1);
        dp.extend([0, 1]);
        let snapshot = |dp: &[u64]| dp.iter().copied().map(Some).collect::<Vec<_>>();
        rec.record("Initialize: F(0) = 0, F(1) = 1", DpStep::linear(&snapshot(&dp), None));

        for i in 2..=n {
            let (a, b) = (dp[i - 1], dp[i - 2]);
            dp.push(a.saturating_add(b));
            rec.record(
                format!("F({i}) = F({}) + F({}) = {a} + {b} = {}", i - 1, i - 2, dp[i]),
                DpStep::linear(&snapshot(&dp), Some(i)),
            );
        }

        if requested > MAX_FIBONACCI_INDEX {
            rec.record(
                format!("F({requested}) does not fit in 64 bits, saturated at {}", u64::MAX),
                DpStep::linear(&snapshot(&dp), None),
            );
            return u64::MAX;
        }

        let result = dp[n];
        rec.record(
            format!("F({n}) = {result}"),
            DpStep::linear(&snapshot(&dp), Some(n)),
        );
        result
    }

    fn step_hint(&self, n: &u64) -> usize {
        (*n).min(MAX_FIBONACCI_INDEX) as usize + 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackItem {
    pub weight: u64,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackInput {
    pub items: Vec<KnapsackItem>,
    pub capacity: usize,
}

/// 0/1 knapsack over an `[item][capacity]` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Knapsack;

impl TracedAlgorithm for Knapsack {
    type Input = KnapsackInput;
    type Output = u64;
    type Step = DpStep;

    fn name(&self) -> &'static str {
        "0/1 knapsack"
    }

    fn execute(&self, input: &KnapsackInput, rec: &mut Recorder<DpStep>) -> u64 {
        let (items, capacity) = (&input.items, input.capacity);
        if items.is_empty() || capacity == 0 {
            rec.record("Empty knapsack or no capacity", DpStep::default());
            return 0;
        }

        let mut dp = vec![vec![0u64; capacity + 1]; items.len() + 1];
        rec.record("Initialize DP table with zeros", DpStep::grid(&dp, None));

        for (i, item) in items.iter().enumerate().map(|(k, item)| (k + 1, item)) {
            for w in 1..=capacity {
                let exclude = dp[i - 1][w];
                let narration = match usize::try_from(item.weight) {
                    Ok(weight) if weight <= w => {
                        let include = item.value.saturating_add(dp[i - 1][w - weight]);
                        dp[i][w] = include.max(exclude);
                        format!(
                            "Item {i}: weight={}, value={}, capacity={w}. Max({include}, {exclude}) = {}",
                            item.weight, item.value, dp[i][w]
                        )
                    }
                    _ => {
                        dp[i][w] = exclude;
                        format!(
                            "Item {i}: weight={} > capacity={w}, skip. Value = {}",
                            item.weight, dp[i][w]
                        )
                    }
                };
                rec.record(narration, DpStep::grid(&dp, Some((i, w))));
            }
        }

        let best = dp[items.len()][capacity];
        rec.record(
            format!("Maximum value with capacity {capacity}: {best}"),
            DpStep::grid(&dp, Some((items.len(), capacity))),
        );
        best
    }

    fn step_hint(&self, input: &KnapsackInput) -> usize {
        input.items.len() * input.capacity + 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsInput {
    pub first: String,
    pub second: String,
}

impl LcsInput {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsOutcome {
    pub length: u64,
    /// One longest common subsequence, recovered from the table.
    pub subsequence: String,
}

/// Longest common subsequence over `char`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lcs;

impl TracedAlgorithm for Lcs {
    type Input = LcsInput;
    type Output = LcsOutcome;
    type Step = DpStep;

    fn name(&self) -> &'static str {
        "longest common subsequence"
    }

    fn execute(&self, input: &LcsInput, rec: &mut Recorder<DpStep>) -> LcsOutcome {
        let x: Vec<char> = input.first.chars().collect();
        let y: Vec<char> = input.second.chars().collect();
        if x.is_empty() || y.is_empty() {
            rec.record("One or both strings are empty", DpStep::default());
            return LcsOutcome {
                length: 0,
                subsequence: String::new(),
            };
        }

        let (m, n) = (x.len(), y.len());
        let mut dp = vec![vec![0u64; n + 1]; m + 1];
        rec.record("Initialize DP table", DpStep::grid(&dp, None));

        for i in 1..=m {
            for j in 1..=n {
                let narration = if x[i - 1] == y[j - 1] {
                    dp[i][j] = dp[i - 1][j - 1] + 1;
                    format!("Match: '{}' = '{}', LCS[{i}][{j}] = {}", x[i - 1], y[j - 1], dp[i][j])
                } else {
                    let (up, left) = (dp[i - 1][j], dp[i][j - 1]);
                    dp[i][j] = up.max(left);
                    format!(
                        "No match: '{}' ≠ '{}', LCS[{i}][{j}] = max({up}, {left}) = {}",
                        x[i - 1],
                        y[j - 1],
                        dp[i][j]
                    )
                };
                rec.record(narration, DpStep::grid(&dp, Some((i, j))));
            }
        }

        let subsequence = backtrack(&dp, &x, &y);
        let length = dp[m][n];
        rec.record(
            format!("LCS length is {length}: \"{subsequence}\""),
            DpStep::grid(&dp, Some((m, n))),
        );
        LcsOutcome {
            length,
            subsequence,
        }
    }

    fn step_hint(&self, input: &LcsInput) -> usize {
        input.first.chars().count() * input.second.chars().count() + 2
    }
}

/// Walk back from the bottom-right corner, preferring the upper cell on ties.
fn backtrack(dp: &[Vec<u64>], x: &[char], y: &[char]) -> String {
    let (mut i, mut j) = (x.len(), y.len());
    let mut out = Vec::new();
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            out.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInput {
    pub coins: Vec<u64>,
    pub amount: usize,
}

/// Fewest coins summing to an amount; `None` when it cannot be made.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinChange;

impl TracedAlgorithm for CoinChange {
    type Input = CoinInput;
    type Output = Option<u64>;
    type Step = DpStep;

    fn name(&self) -> &'static str {
        "coin change"
    }

    fn execute(&self, input: &CoinInput, rec: &mut Recorder<DpStep>) -> Option<u64> {
        let amount = input.amount;
        if amount == 0 {
            rec.record("Amount is 0, no coins needed", DpStep::linear(&[Some(0)], Some(0)));
            return Some(0);
        }
        if input.coins.is_empty() {
            rec.record("No coins available", DpStep::default());
            return None;
        }

        let mut dp: Vec<Option<u64>> = vec![None; amount + 1];
        dp[0] = Some(0);
        rec.record("Initialize: dp[0] = 0, others = ∞", DpStep::linear(&dp, None));

        for i in 1..=amount {
            for &coin in &input.coins {
                let Some(rest) = usize::try_from(coin).ok().and_then(|c| i.checked_sub(c)) else {
                    continue;
                };
                let Some(prior) = dp[rest] else {
                    continue;
                };
                let candidate = prior + 1;
                if dp[i].map_or(true, |current| candidate < current) {
                    dp[i] = Some(candidate);
                    rec.record(
                        format!("Amount {i}: using coin {coin}, dp[{i}] = dp[{rest}] + 1 = {candidate}"),
                        DpStep::linear(&dp, Some(i)),
                    );
                }
            }
        }

        let result = dp[amount];
        let narration = match result {
            Some(count) => format!("Minimum coins for amount {amount}: {count}"),
            None => format!("Amount {amount} cannot be made with the given coins"),
        };
        rec.record(narration, DpStep::linear(&dp, Some(amount)));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn linear(step: &DpStep) -> &[Option<u64>] {
        match &step.table {
            DpTable::Linear(cells) => cells,
            DpTable::Grid(_) => panic!("expected a linear table"),
        }
    }

    #[test]
    fn fibonacci_ten() {
        let traced = TraceEngine::new(Fibonacci).run(&10);
        assert_eq!(traced.result, 55);
        // init + F(2)..F(10) + summary
        assert_eq!(traced.trace.len(), 11);
        assert_eq!(
            traced.trace.get(1).unwrap().narration,
            "F(2) = F(1) + F(0) = 1 + 0 = 1"
        );
    }

    #[test]
    fn fibonacci_base_cases_are_single_steps() {
        for (n, expected) in [(0, 0), (1, 1)] {
            let traced = TraceEngine::new(Fibonacci).run(&n);
            assert_eq!(traced.result, expected);
            assert_eq!(traced.trace.len(), 1);
        }
    }

    #[test]
    fn fibonacci_saturates() {
        let last = TraceEngine::new(Fibonacci).run(&MAX_FIBONACCI_INDEX).result;
        assert_eq!(last, 12_200_160_415_121_876_738);
        assert_eq!(TraceEngine::new(Fibonacci).run(&100).result, u64::MAX);
    }

    #[test]
    fn huge_index_keeps_the_table_bounded() {
        let traced = TraceEngine::new(Fibonacci).run(&u64::MAX);
        assert_eq!(traced.result, u64::MAX);
        // init + F(2)..F(93) + saturated summary
        assert_eq!(traced.trace.len(), MAX_FIBONACCI_INDEX as usize + 1);
        let last = traced.final_step().unwrap();
        assert!(last.narration.contains("saturated"));
        assert_eq!(last.state.focus, None);
        match &last.state.table {
            DpTable::Linear(cells) => assert_eq!(cells.len(), MAX_FIBONACCI_INDEX as usize + 1),
            DpTable::Grid(_) => panic!("expected a linear table"),
        }
    }

    #[test]
    fn knapsack_classic() {
        let input = KnapsackInput {
            items: vec![
                KnapsackItem { weight: 1, value: 1 },
                KnapsackItem { weight: 3, value: 4 },
                KnapsackItem { weight: 4, value: 5 },
                KnapsackItem { weight: 5, value: 7 },
            ],
            capacity: 7,
        };
        let traced = TraceEngine::new(Knapsack).run(&input);
        assert_eq!(traced.result, 9);
        // init + 4 * 7 cells + summary
        assert_eq!(traced.trace.len(), 30);
    }

    #[test]
    fn knapsack_degenerate() {
        let input = KnapsackInput {
            items: vec![],
            capacity: 10,
        };
        assert_eq!(TraceEngine::new(Knapsack).run(&input).trace.len(), 1);
    }

    #[test]
    fn lcs_recovers_a_subsequence() {
        let traced = TraceEngine::new(Lcs).run(&LcsInput::new("ABCBDAB", "BDCABA"));
        assert_eq!(traced.result.length, 4);
        assert_eq!(traced.result.subsequence.chars().count(), 4);
        assert_eq!(traced.result.subsequence, "BCBA");
    }

    #[test]
    fn lcs_empty_string() {
        let traced = TraceEngine::new(Lcs).run(&LcsInput::new("", "ABC"));
        assert_eq!(traced.result.length, 0);
        assert_eq!(traced.trace.len(), 1);
    }

    #[test]
    fn coin_change_eleven() {
        let input = CoinInput {
            coins: vec![1, 2, 5],
            amount: 11,
        };
        let traced = TraceEngine::new(CoinChange).run(&input);
        assert_eq!(traced.result, Some(3));
        assert_eq!(linear(&traced.trace.last().unwrap().state)[11], Some(3));
    }

    #[test]
    fn coin_change_impossible() {
        let input = CoinInput {
            coins: vec![2],
            amount: 3,
        };
        let traced = TraceEngine::new(CoinChange).run(&input);
        assert_eq!(traced.result, None);
        assert!(traced.trace.last().unwrap().narration.contains("cannot be made"));
    }

    #[test]
    fn coin_change_zero_amount() {
        let input = CoinInput {
            coins: vec![],
            amount: 0,
        };
        let traced = TraceEngine::new(CoinChange).run(&input);
        assert_eq!(traced.result, Some(0));
        assert_eq!(traced.trace.len(), 1);
    }
}

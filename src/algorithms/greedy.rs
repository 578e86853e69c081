//! Greedy algorithms: sort once (or every round), then commit choice by choice.
//!
//! All orderings use stable sorts, so records that tie on the sort key keep
//! their input order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub start: u64,
    pub finish: u64,
}

impl Activity {
    pub fn new(name: impl Into<String>, start: u64, finish: u64) -> Self {
        Self {
            name: name.into(),
            start,
            finish,
        }
    }

    /// Half-open overlap: one finishing exactly when the other starts is fine.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalItem {
    pub name: String,
    pub weight: f64,
    pub value: f64,
}

impl FractionalItem {
    pub fn new(name: impl Into<String>, weight: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.value / self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalInput {
    pub items: Vec<FractionalItem>,
    pub capacity: f64,
}

/// How much of one item went into the knapsack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub name: String,
    /// In `(0, 1]`.
    pub fraction: f64,
    pub weight: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalOutcome {
    pub taken: Vec<Portion>,
    pub total_weight: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub symbol: String,
    pub frequency: u64,
}

impl Symbol {
    pub fn new(symbol: impl Into<String>, frequency: u64) -> Self {
        Self {
            symbol: symbol.into(),
            frequency,
        }
    }
}

/// Node of a Huffman tree. Internal nodes concatenate their children's
/// symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanNode {
    pub symbols: String,
    pub frequency: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<HuffmanNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<HuffmanNode>>,
}

impl HuffmanNode {
    fn leaf(symbol: &Symbol) -> Self {
        Self {
            symbols: symbol.symbol.clone(),
            frequency: symbol.frequency,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn entry(&self) -> PoolEntry {
        PoolEntry {
            symbols: self.symbols.clone(),
            frequency: self.frequency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanOutcome {
    pub tree: Option<HuffmanNode>,
    /// Symbol to bit string, in pre-order of the tree.
    pub codes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub deadline: u64,
    pub profit: u64,
}

impl Job {
    pub fn new(name: impl Into<String>, deadline: u64, profit: u64) -> Self {
        Self {
            name: name.into(),
            deadline,
            profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSchedule {
    /// Jobs in the order they were accepted (highest profit first).
    pub scheduled: Vec<Job>,
    /// Occupied slots in time order; `(t, job)` runs `job` in time unit `t + 1`.
    pub slots: Vec<(u64, String)>,
    pub total_profit: u64,
}

/// Frequency-pool entry shown while the Huffman tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub symbols: String,
    pub frequency: u64,
}

/// Per-algorithm greedy state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GreedyStep {
    Activities {
        /// Activities in finish order.
        ordered: Vec<Activity>,
        /// Positions in `ordered` kept so far.
        selected: Vec<usize>,
        considering: Option<usize>,
        skipped: bool,
    },
    Knapsack {
        /// Items by descending value/weight ratio.
        ordered: Vec<FractionalItem>,
        taken: Vec<Portion>,
        total_value: f64,
        remaining: f64,
        considering: Option<usize>,
    },
    Huffman {
        pool: Vec<PoolEntry>,
        merged: Option<(PoolEntry, PoolEntry)>,
        codes: IndexMap<String, String>,
    },
    Jobs {
        /// Jobs by descending profit.
        ordered: Vec<Job>,
        slots: Vec<(u64, String)>,
        total_profit: u64,
        considering: Option<usize>,
        rejected: bool,
    },
}

/// Interval scheduling: earliest finish first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivitySelection;

impl TracedAlgorithm for ActivitySelection {
    type Input = [Activity];
    type Output = Vec<Activity>;
    type Step = GreedyStep;

    fn name(&self) -> &'static str {
        "activity selection"
    }

    fn execute(&self, activities: &[Activity], rec: &mut Recorder<GreedyStep>) -> Vec<Activity> {
        let step = |ordered: &[Activity], selected: &[usize], considering, skipped| {
            GreedyStep::Activities {
                ordered: ordered.to_vec(),
                selected: selected.to_vec(),
                considering,
                skipped,
            }
        };

        if activities.is_empty() {
            rec.record("No activities to select", step(&[], &[], None, false));
            return Vec::new();
        }

        let mut ordered = activities.to_vec();
        ordered.sort_by_key(|a| a.finish);
        rec.record("Sort activities by finish time", step(&ordered, &[], None, false));

        let mut selected = vec![0];
        let first = &ordered[0];
        rec.record(
            format!(
                "Select first activity: {} ({}-{})",
                first.name, first.start, first.finish
            ),
            step(&ordered, &selected, Some(0), false),
        );

        let mut last = 0;
        for i in 1..ordered.len() {
            let a = &ordered[i];
            if a.start >= ordered[last].finish {
                selected.push(i);
                last = i;
                rec.record(
                    format!("Select {} ({}-{}) - no conflict", a.name, a.start, a.finish),
                    step(&ordered, &selected, Some(i), false),
                );
            } else {
                rec.record(
                    format!(
                        "Skip {} ({}-{}) - conflicts with previous",
                        a.name, a.start, a.finish
                    ),
                    step(&ordered, &selected, Some(i), true),
                );
            }
        }

        let chosen: Vec<Activity> = selected.iter().map(|&i| ordered[i].clone()).collect();
        let names: Vec<&str> = chosen.iter().map(|a| a.name.as_str()).collect();
        rec.record(
            format!("Selected {} activities: {}", chosen.len(), names.join(", ")),
            step(&ordered, &selected, None, false),
        );
        chosen
    }
}

/// Fractional knapsack: best value per unit weight first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FractionalKnapsack;

impl TracedAlgorithm for FractionalKnapsack {
    type Input = FractionalInput;
    type Output = FractionalOutcome;
    type Step = GreedyStep;

    fn name(&self) -> &'static str {
        "fractional knapsack"
    }

    fn execute(&self, input: &FractionalInput, rec: &mut Recorder<GreedyStep>) -> FractionalOutcome {
        let step = |ordered: &[FractionalItem], taken: &[Portion], total_value, remaining, considering| {
            GreedyStep::Knapsack {
                ordered: ordered.to_vec(),
                taken: taken.to_vec(),
                total_value,
                remaining,
                considering,
            }
        };

        if input.items.is_empty() || input.capacity <= 0.0 {
            rec.record("No items or capacity", step(&[], &[], 0.0, input.capacity.max(0.0), None));
            return FractionalOutcome {
                taken: Vec::new(),
                total_weight: 0.0,
                total_value: 0.0,
            };
        }

        let mut ordered = input.items.clone();
        ordered.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        let mut remaining = input.capacity;
        let mut total_value = 0.0;
        let mut taken: Vec<Portion> = Vec::new();
        rec.record(
            "Sort items by value-to-weight ratio (descending)",
            step(&ordered, &taken, total_value, remaining, None),
        );

        for (i, item) in ordered.iter().enumerate() {
            if remaining <= 0.0 {
                break;
            }
            let narration = if item.weight <= remaining {
                remaining -= item.weight;
                total_value += item.value;
                taken.push(Portion {
                    name: item.name.clone(),
                    fraction: 1.0,
                    weight: item.weight,
                    value: item.value,
                });
                format!(
                    "Take full {}: weight={}, value={}, ratio={:.2}",
                    item.name,
                    item.weight,
                    item.value,
                    item.ratio()
                )
            } else {
                let fraction = remaining / item.weight;
                let value = item.value * fraction;
                total_value += value;
                taken.push(Portion {
                    name: item.name.clone(),
                    fraction,
                    weight: remaining,
                    value,
                });
                remaining = 0.0;
                format!(
                    "Take {:.1}% of {}: value={value:.2}",
                    fraction * 100.0,
                    item.name
                )
            };
            rec.record(narration, step(&ordered, &taken, total_value, remaining, Some(i)));
        }

        let total_weight = input.capacity - remaining;
        rec.record(
            format!("Knapsack filled: weight={total_weight}, total value={total_value:.2}"),
            step(&ordered, &taken, total_value, remaining, None),
        );
        FractionalOutcome {
            taken,
            total_weight,
            total_value,
        }
    }
}

/// Huffman coding by repeatedly merging the two least frequent nodes.
///
/// The pool is stably re-sorted by frequency every round and the merged node
/// goes to the back, so among equal frequencies older nodes are merged first.
/// Left edges are `0`, right edges `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCoding;

impl TracedAlgorithm for HuffmanCoding {
    type Input = [Symbol];
    type Output = HuffmanOutcome;
    type Step = GreedyStep;

    fn name(&self) -> &'static str {
        "huffman coding"
    }

    fn execute(&self, symbols: &[Symbol], rec: &mut Recorder<GreedyStep>) -> HuffmanOutcome {
        let step = |pool: &[HuffmanNode], merged, codes: &IndexMap<String, String>| {
            GreedyStep::Huffman {
                pool: pool.iter().map(HuffmanNode::entry).collect(),
                merged,
                codes: codes.clone(),
            }
        };

        let mut codes = IndexMap::new();
        match symbols {
            [] => {
                rec.record("No symbols to encode", step(&[], None, &codes));
                return HuffmanOutcome { tree: None, codes };
            }
            [only] => {
                let leaf = HuffmanNode::leaf(only);
                codes.insert(only.symbol.clone(), "0".to_owned());
                rec.record(
                    "Single symbol - assign code '0'",
                    step(std::slice::from_ref(&leaf), None, &codes),
                );
                return HuffmanOutcome {
                    tree: Some(leaf),
                    codes,
                };
            }
            _ => {}
        }

        let mut pool: Vec<HuffmanNode> = symbols.iter().map(HuffmanNode::leaf).collect();
        rec.record(
            "Initialize nodes with symbol frequencies",
            step(&pool, None, &codes),
        );

        while pool.len() > 1 {
            pool.sort_by_key(|n| n.frequency);
            let left = pool.remove(0);
            let right = pool.remove(0);
            let parent = HuffmanNode {
                symbols: format!("{}{}", left.symbols, right.symbols),
                frequency: left.frequency.saturating_add(right.frequency),
                left: None,
                right: None,
            };
            let narration = format!(
                "Merge '{}' ({}) and '{}' ({}) -> '{}' ({})",
                left.symbols,
                left.frequency,
                right.symbols,
                right.frequency,
                parent.symbols,
                parent.frequency
            );
            let merged = Some((left.entry(), right.entry()));
            pool.push(HuffmanNode {
                left: Some(Box::new(left)),
                right: Some(Box::new(right)),
                ..parent
            });
            rec.record(narration, step(&pool, merged, &codes));
        }

        let tree = pool.pop();
        if let Some(root) = &tree {
            assign_codes(root, String::new(), &mut codes);
        }
        let listed: Vec<String> = codes.iter().map(|(s, c)| format!("{s}={c}")).collect();
        rec.record(
            format!("Generate Huffman codes from tree: {}", listed.join(", ")),
            step(&[], None, &codes),
        );
        HuffmanOutcome { tree, codes }
    }
}

fn assign_codes(node: &HuffmanNode, prefix: String, codes: &mut IndexMap<String, String>) {
    if node.is_leaf() {
        let code = if prefix.is_empty() { "0".to_owned() } else { prefix };
        codes.insert(node.symbols.clone(), code);
        return;
    }
    if let Some(left) = &node.left {
        assign_codes(left, format!("{prefix}0"), codes);
    }
    if let Some(right) = &node.right {
        assign_codes(right, format!("{prefix}1"), codes);
    }
}

/// Unit-time job sequencing with deadlines, most profitable job first, each
/// placed in the latest free slot before its deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobScheduling;

impl TracedAlgorithm for JobScheduling {
    type Input = [Job];
    type Output = JobSchedule;
    type Step = GreedyStep;

    fn name(&self) -> &'static str {
        "job scheduling"
    }

    fn execute(&self, jobs: &[Job], rec: &mut Recorder<GreedyStep>) -> JobSchedule {
        let step = |ordered: &[Job], slots: &BTreeMap<u64, String>, total_profit, considering, rejected| {
            GreedyStep::Jobs {
                ordered: ordered.to_vec(),
                slots: occupied(slots),
                total_profit,
                considering,
                rejected,
            }
        };

        if jobs.is_empty() {
            rec.record("No jobs to schedule", step(&[], &BTreeMap::new(), 0, None, false));
            return JobSchedule {
                scheduled: Vec::new(),
                slots: Vec::new(),
                total_profit: 0,
            };
        }

        let mut ordered = jobs.to_vec();
        ordered.sort_by(|a, b| b.profit.cmp(&a.profit));
        let mut slots = BTreeMap::new();
        let mut scheduled = Vec::new();
        let mut total_profit = 0u64;

        rec.record(
            "Sort jobs by profit (descending)",
            step(&ordered, &slots, total_profit, None, false),
        );

        for (i, job) in ordered.iter().enumerate() {
            match latest_free_slot(&slots, job.deadline) {
                Some(t) => {
                    slots.insert(t, job.name.clone());
                    scheduled.push(job.clone());
                    total_profit = total_profit.saturating_add(job.profit);
                    rec.record(
                        format!(
                            "Schedule {} at time slot {}, profit: {}",
                            job.name,
                            t + 1,
                            job.profit
                        ),
                        step(&ordered, &slots, total_profit, Some(i), false),
                    );
                }
                None => rec.record(
                    format!(
                        "Cannot schedule {} - no available slots before deadline {}",
                        job.name, job.deadline
                    ),
                    step(&ordered, &slots, total_profit, Some(i), true),
                ),
            }
        }

        rec.record(
            format!(
                "Scheduled {} of {} jobs, total profit: {total_profit}",
                scheduled.len(),
                ordered.len()
            ),
            step(&ordered, &slots, total_profit, None, false),
        );
        JobSchedule {
            scheduled,
            slots: occupied(&slots),
            total_profit,
        }
    }
}

fn occupied(slots: &BTreeMap<u64, String>) -> Vec<(u64, String)> {
    slots.iter().map(|(&t, name)| (t, name.clone())).collect()
}

/// Latest unoccupied time index before `deadline`, walking down past the
/// occupied run that ends at `deadline - 1`.
fn latest_free_slot(slots: &BTreeMap<u64, String>, deadline: u64) -> Option<u64> {
    let mut t = deadline.checked_sub(1)?;
    for &taken in slots.range(..=t).rev().map(|(time, _)| time) {
        if taken < t {
            break;
        }
        t = t.checked_sub(1)?;
    }
    Some(t)
}

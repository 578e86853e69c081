//! Searches that narrate every index they inspect.
//!
//! Binary, jump and interpolation search need ordered data, so they first
//! sort a private working copy and search that. Reported indices refer to the
//! working copy, which is also what every step snapshots. Linear search keeps
//! the caller's order.

use serde::{Deserialize, Serialize};

use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;
use crate::utils::isqrt;

/// Which half a halving search continues in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Working array plus the search window and the index under inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStep {
    pub array: Vec<i64>,
    /// Inclusive lower bound of the live window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<usize>,
    /// Inclusive upper bound of the live window; `None` once it is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<usize>,
    /// Index being compared against the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<usize>,
    /// Inclusive block scanned linearly by jump search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl SearchStep {
    pub fn of(array: &[i64]) -> Self {
        Self {
            array: array.to_vec(),
            ..Self::default()
        }
    }

    pub fn probing(array: &[i64], index: usize) -> Self {
        Self {
            probe: Some(index),
            ..Self::of(array)
        }
    }

    pub fn found(array: &[i64], index: usize) -> Self {
        Self {
            probe: Some(index),
            found: Some(index),
            ..Self::of(array)
        }
    }

    fn window(array: &[i64], low: usize, high: Option<usize>) -> Self {
        Self {
            low: Some(low),
            high,
            ..Self::of(array)
        }
    }
}

/// Array to search and the value to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub values: Vec<i64>,
    pub target: i64,
}

impl SearchQuery {
    pub fn new(values: impl Into<Vec<i64>>, target: i64) -> Self {
        Self {
            values: values.into(),
            target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub found: bool,
    /// Index in the searched (possibly sorted) working array.
    pub index: Option<usize>,
}

impl SearchOutcome {
    pub fn hit(index: usize) -> Self {
        Self {
            found: true,
            index: Some(index),
        }
    }

    pub fn miss() -> Self {
        Self {
            found: false,
            index: None,
        }
    }

    /// Index with `-1` standing for "not found".
    pub fn display_index(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut a = values.to_vec();
    a.sort_unstable();
    a
}

fn empty_array(target: i64, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
    rec.record(
        format!("Array is empty, target {target} cannot be present"),
        SearchStep::default(),
    );
    SearchOutcome::miss()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl TracedAlgorithm for LinearSearch {
    type Input = SearchQuery;
    type Output = SearchOutcome;
    type Step = SearchStep;

    fn name(&self) -> &'static str {
        "linear search"
    }

    fn execute(&self, query: &SearchQuery, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
        let a = &query.values;
        let target = query.target;
        if a.is_empty() {
            return empty_array(target, rec);
        }
        rec.record(
            format!("Starting linear search for target: {target}"),
            SearchStep::of(a),
        );

        for (i, &value) in a.iter().enumerate() {
            rec.record(
                format!("Checking element at index {i}: {value}"),
                SearchStep::probing(a, i),
            );
            if value == target {
                rec.record(
                    format!("Found target {target} at index {i}!"),
                    SearchStep::found(a, i),
                );
                return SearchOutcome::hit(i);
            }
        }

        rec.record(
            format!("Target {target} not found in the array"),
            SearchStep::of(a),
        );
        SearchOutcome::miss()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl TracedAlgorithm for BinarySearch {
    type Input = SearchQuery;
    type Output = SearchOutcome;
    type Step = SearchStep;

    fn name(&self) -> &'static str {
        "binary search"
    }

    fn execute(&self, query: &SearchQuery, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
        let target = query.target;
        if query.values.is_empty() {
            return empty_array(target, rec);
        }
        let a = sorted_copy(&query.values);

        // Half-open window [low, high); steps report it inclusively.
        let (mut low, mut high) = (0usize, a.len());
        rec.record(
            format!("Array sorted for binary search. Looking for target: {target}"),
            SearchStep::window(&a, low, high.checked_sub(1)),
        );

        while low < high {
            let mid = (low + high - 1) / 2;
            rec.record(
                format!("Checking middle element at index {mid}: {}", a[mid]),
                SearchStep {
                    probe: Some(mid),
                    ..SearchStep::window(&a, low, Some(high - 1))
                },
            );

            if a[mid] == target {
                rec.record(
                    format!("Found target {target} at index {mid}!"),
                    SearchStep {
                        low: Some(low),
                        high: Some(high - 1),
                        ..SearchStep::found(&a, mid)
                    },
                );
                return SearchOutcome::hit(mid);
            }

            if a[mid] < target {
                low = mid + 1;
                rec_direction(rec, &a, a[mid], target, Direction::Right, low, high);
            } else {
                high = mid;
                rec_direction(rec, &a, a[mid], target, Direction::Left, low, high);
            }
        }

        rec.record(
            format!("Target {target} not found in the array"),
            SearchStep::window(&a, low, high.checked_sub(1)),
        );
        SearchOutcome::miss()
    }
}

/// Record the "continue left/right" step of a halving search.
fn rec_direction(
    rec: &mut Recorder<SearchStep>,
    a: &[i64],
    probed: i64,
    target: i64,
    direction: Direction,
    low: usize,
    high_exclusive: usize,
) {
    let narration = match direction {
        Direction::Right => format!("{probed} < {target}, search right half"),
        Direction::Left => format!("{probed} > {target}, search left half"),
    };
    rec.record(
        narration,
        SearchStep {
            direction: Some(direction),
            ..SearchStep::window(a, low, high_exclusive.checked_sub(1))
        },
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JumpSearch;

impl TracedAlgorithm for JumpSearch {
    type Input = SearchQuery;
    type Output = SearchOutcome;
    type Step = SearchStep;

    fn name(&self) -> &'static str {
        "jump search"
    }

    fn execute(&self, query: &SearchQuery, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
        let target = query.target;
        if query.values.is_empty() {
            return empty_array(target, rec);
        }
        let a = sorted_copy(&query.values);
        let n = a.len();
        let jump = isqrt(n);
        let mut step = jump;
        let mut prev = 0usize;

        rec.record(
            format!("Jump Search with jump size: {jump}. Looking for target: {target}"),
            SearchStep {
                jump_size: Some(jump),
                ..SearchStep::of(&a)
            },
        );

        while a[step.min(n) - 1] < target {
            let edge = step.min(n) - 1;
            rec.record(
                format!("Jumping to index {edge}: {} < {target}", a[edge]),
                SearchStep {
                    jump_size: Some(jump),
                    ..SearchStep::probing(&a, edge)
                },
            );
            prev = step;
            step += jump;
            if prev >= n {
                rec.record(
                    format!("Reached end of array, target {target} not found"),
                    SearchStep::of(&a),
                );
                return SearchOutcome::miss();
            }
        }

        let block_end = step.min(n) - 1;
        rec.record(
            format!("Found potential block, doing linear search from index {prev} to {block_end}"),
            SearchStep {
                block: Some((prev, block_end)),
                ..SearchStep::of(&a)
            },
        );

        while a[prev] < target {
            rec.record(
                format!("Linear search at index {prev}: {}", a[prev]),
                SearchStep {
                    block: Some((prev, block_end)),
                    ..SearchStep::probing(&a, prev)
                },
            );
            prev += 1;
            if prev == step.min(n) {
                rec.record(
                    format!("Reached end of block, target {target} not found"),
                    SearchStep::of(&a),
                );
                return SearchOutcome::miss();
            }
        }

        if a[prev] == target {
            rec.record(
                format!("Found target {target} at index {prev}!"),
                SearchStep::found(&a, prev),
            );
            return SearchOutcome::hit(prev);
        }

        rec.record(
            format!("Target {target} not found ({} at index {prev} is larger)", a[prev]),
            SearchStep::probing(&a, prev),
        );
        SearchOutcome::miss()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InterpolationSearch;

impl TracedAlgorithm for InterpolationSearch {
    type Input = SearchQuery;
    type Output = SearchOutcome;
    type Step = SearchStep;

    fn name(&self) -> &'static str {
        "interpolation search"
    }

    fn execute(&self, query: &SearchQuery, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
        let target = query.target;
        if query.values.is_empty() {
            return empty_array(target, rec);
        }
        let a = sorted_copy(&query.values);
        let (mut low, mut high) = (0usize, a.len() - 1);

        rec.record(
            format!("Interpolation Search for target: {target}"),
            SearchStep::window(&a, low, Some(high)),
        );

        while low <= high && target >= a[low] && target <= a[high] {
            if low == high {
                if a[low] == target {
                    rec.record(
                        format!("Found target {target} at index {low}!"),
                        SearchStep::found(&a, low),
                    );
                    return SearchOutcome::hit(low);
                }
                break;
            }

            let pos = interpolate(&a, low, high, target);
            rec.record(
                format!("Interpolated position: {pos}, checking value: {}", a[pos]),
                SearchStep {
                    probe: Some(pos),
                    ..SearchStep::window(&a, low, Some(high))
                },
            );

            if a[pos] == target {
                rec.record(
                    format!("Found target {target} at index {pos}!"),
                    SearchStep::found(&a, pos),
                );
                return SearchOutcome::hit(pos);
            }

            if a[pos] < target {
                low = pos + 1;
                rec_direction(rec, &a, a[pos], target, Direction::Right, low, high + 1);
            } else {
                rec_direction(rec, &a, a[pos], target, Direction::Left, low, pos);
                if pos == 0 {
                    break;
                }
                high = pos - 1;
            }
        }

        rec.record(format!("Target {target} not found"), SearchStep::of(&a));
        SearchOutcome::miss()
    }
}

/// Probe position for `target` in the sorted window `a[low..=high]`.
///
/// Requires `a[low] <= target <= a[high]`; a flat window probes `low`.
fn interpolate(a: &[i64], low: usize, high: usize, target: i64) -> usize {
    let span = i128::from(a[high]) - i128::from(a[low]);
    if span == 0 {
        return low;
    }
    let offset = (i128::from(target) - i128::from(a[low])) * (high - low) as i128 / span;
    low + offset as usize
}

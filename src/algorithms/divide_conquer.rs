//! Divide and conquer, shown through its recursion.
//!
//! Unlike [`super::sorting`], these variants narrate the split/solve/combine
//! structure itself: every divide, base case and combine is a step. The
//! recorder is threaded down the recursion explicitly.

use serde::{Deserialize, Serialize};

use super::searching::{Direction, SearchOutcome, SearchQuery, SearchStep};
use super::sorting::SortStep;
use crate::error::InputError;
use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;
use crate::utils::bracketed;

/// Top-down merge sort that recurses on copies of each half.
///
/// Steps snapshot the sub-array being worked on, so `array` shrinks and grows
/// with the recursion depth. The final step carries the whole sorted array.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveMergeSort;

impl TracedAlgorithm for RecursiveMergeSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "recursive merge sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        if input.len() <= 1 {
            rec.record(
                format!("Base case: array of length {}, already sorted", input.len()),
                SortStep::of(input),
            );
            return input.to_vec();
        }
        let sorted = split_and_merge(input, rec);
        rec.record(
            format!("Merge sort complete: {}", bracketed(&sorted)),
            SortStep::of(&sorted),
        );
        sorted
    }
}

fn split_and_merge(arr: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
    if arr.len() <= 1 {
        rec.record(
            format!("Base case: array of length {}", arr.len()),
            SortStep::of(arr),
        );
        return arr.to_vec();
    }

    let (left, right) = arr.split_at(arr.len() / 2);
    rec.record(
        format!(
            "Divide: {} into {} and {}",
            bracketed(arr),
            bracketed(left),
            bracketed(right)
        ),
        SortStep {
            segment: Some((0, arr.len() - 1)),
            ..SortStep::of(arr)
        },
    );

    let left = split_and_merge(left, rec);
    let right = split_and_merge(right, rec);

    let mut merged = Vec::with_capacity(arr.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let (l, r) = (left[i], right[j]);
        if l <= r {
            merged.push(l);
            i += 1;
        } else {
            merged.push(r);
            j += 1;
        }
        rec.record(
            format!("Merge: comparing {l} and {r}, result: {}", bracketed(&merged)),
            SortStep {
                merged: merged.clone(),
                ..SortStep::of(arr)
            },
        );
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    rec.record(
        format!("Merge complete: {}", bracketed(&merged)),
        SortStep {
            merged: merged.clone(),
            ..SortStep::of(&merged)
        },
    );
    merged
}

/// In-place Lomuto quick sort that reports each pivot once it is final.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveQuickSort;

impl TracedAlgorithm for RecursiveQuickSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "recursive quick sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        if input.len() <= 1 {
            rec.record("Base case: array too small to sort", SortStep::of(input));
            return input.to_vec();
        }
        let mut a = input.to_vec();
        let high = a.len() - 1;
        conquer(&mut a, 0, high, rec);
        rec.record(
            format!("Quick sort complete: {}", bracketed(&a)),
            SortStep::of(&a),
        );
        a
    }
}

fn conquer(a: &mut [i64], low: usize, high: usize, rec: &mut Recorder<SortStep>) {
    if low >= high {
        return;
    }
    let pi = place_pivot(a, low, high, rec);
    rec.record(
        format!("Pivot {} is in correct position at index {pi}", a[pi]),
        SortStep {
            pivot: Some(pi),
            ..SortStep::of(a)
        },
    );
    if pi > low {
        conquer(a, low, pi - 1, rec);
    }
    conquer(a, pi + 1, high, rec);
}

fn place_pivot(a: &mut [i64], low: usize, high: usize, rec: &mut Recorder<SortStep>) -> usize {
    let pivot = a[high];
    rec.record(
        format!("Choose pivot: {pivot} at index {high}"),
        SortStep {
            pivot: Some(high),
            segment: Some((low, high)),
            ..SortStep::of(a)
        },
    );

    let mut store = low;
    for j in low..high {
        if a[j] < pivot {
            a.swap(store, j);
            rec.record(
                format!("{} < {pivot}, swap positions {store} and {j}", a[store]),
                SortStep {
                    pivot: Some(high),
                    ..SortStep::swapped(a, vec![store, j])
                },
            );
            store += 1;
        }
    }
    a.swap(store, high);
    rec.record(
        format!("Place pivot {pivot} in correct position"),
        SortStep {
            pivot: Some(store),
            ..SortStep::swapped(a, vec![store, high])
        },
    );
    store
}

/// Binary search written as recursion over a sorted working copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveBinarySearch;

impl TracedAlgorithm for RecursiveBinarySearch {
    type Input = SearchQuery;
    type Output = SearchOutcome;
    type Step = SearchStep;

    fn name(&self) -> &'static str {
        "recursive binary search"
    }

    fn execute(&self, query: &SearchQuery, rec: &mut Recorder<SearchStep>) -> SearchOutcome {
        if query.values.is_empty() {
            rec.record("Empty array - target not found", SearchStep::default());
            return SearchOutcome::miss();
        }
        let mut a = query.values.clone();
        a.sort_unstable();
        halve(&a, query.target, 0, a.len(), rec)
    }
}

/// Search `a[low..high]`.
fn halve(
    a: &[i64],
    target: i64,
    low: usize,
    high: usize,
    rec: &mut Recorder<SearchStep>,
) -> SearchOutcome {
    if low >= high {
        rec.record(
            format!("Target {target} not found in array"),
            SearchStep::of(a),
        );
        return SearchOutcome::miss();
    }

    let last = high - 1;
    let mid = (low + last) / 2;
    rec.record(
        format!(
            "Search range [{low}, {last}], middle index: {mid}, value: {}",
            a[mid]
        ),
        SearchStep {
            low: Some(low),
            high: Some(last),
            ..SearchStep::probing(a, mid)
        },
    );

    if a[mid] == target {
        rec.record(
            format!("Found target {target} at index {mid}!"),
            SearchStep::found(a, mid),
        );
        return SearchOutcome::hit(mid);
    }

    if a[mid] > target {
        rec.record(
            format!("{} > {target}, search left half", a[mid]),
            SearchStep {
                direction: Some(Direction::Left),
                ..SearchStep::of(a)
            },
        );
        halve(a, target, low, mid, rec)
    } else {
        rec.record(
            format!("{} < {target}, search right half", a[mid]),
            SearchStep {
                direction: Some(Direction::Right),
                ..SearchStep::of(a)
            },
        );
        halve(a, target, mid + 1, high, rec)
    }
}

/// What a maximum-subarray step is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubarrayPhase {
    #[default]
    Empty,
    Base,
    Divide,
    Cross,
    Combine,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubarrayStep {
    pub array: Vec<i64>,
    pub phase: SubarrayPhase,
    /// Inclusive range the recursion is working on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<usize>,
    /// Best subarray known for this range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSubarray {
    pub sum: i64,
    /// Inclusive bounds; `None` for an empty array.
    pub range: Option<(usize, usize)>,
}

/// Maximum contiguous subarray sum by splitting at the middle.
///
/// Ties between the halves and the crossing candidate go to the left half,
/// then the right half. Sums saturate at the `i64` bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumSubarray;

impl TracedAlgorithm for MaximumSubarray {
    type Input = [i64];
    type Output = MaxSubarray;
    type Step = SubarrayStep;

    fn name(&self) -> &'static str {
        "maximum subarray"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SubarrayStep>) -> MaxSubarray {
        if input.is_empty() {
            rec.record(
                "Empty array, maximum subarray sum is 0",
                SubarrayStep {
                    sum: Some(0),
                    ..SubarrayStep::default()
                },
            );
            return MaxSubarray {
                sum: 0,
                range: None,
            };
        }

        let best = solve(input, 0, input.len() - 1, rec);
        rec.record(
            format!(
                "Maximum subarray sum is {} over indices [{}, {}]",
                best.sum, best.from, best.to
            ),
            SubarrayStep {
                array: input.to_vec(),
                phase: SubarrayPhase::Done,
                range: Some((0, input.len() - 1)),
                mid: None,
                best: Some((best.from, best.to)),
                sum: Some(best.sum),
            },
        );
        MaxSubarray {
            sum: best.sum,
            range: Some((best.from, best.to)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    sum: i64,
    from: usize,
    to: usize,
}

fn solve(a: &[i64], left: usize, right: usize, rec: &mut Recorder<SubarrayStep>) -> Candidate {
    let snapshot = |phase, mid, best: Option<Candidate>| SubarrayStep {
        array: a.to_vec(),
        phase,
        range: Some((left, right)),
        mid,
        best: best.map(|c| (c.from, c.to)),
        sum: best.map(|c| c.sum),
    };

    if left == right {
        let base = Candidate {
            sum: a[left],
            from: left,
            to: left,
        };
        rec.record(
            format!("Base case: single element {}", a[left]),
            snapshot(SubarrayPhase::Base, None, Some(base)),
        );
        return base;
    }

    let mid = (left + right) / 2;
    rec.record(
        format!("Divide: range [{left}, {right}] at middle {mid}"),
        snapshot(SubarrayPhase::Divide, Some(mid), None),
    );

    let lower = solve(a, left, mid, rec);
    let upper = solve(a, mid + 1, right, rec);
    let cross = crossing(a, left, mid, right);
    rec.record(
        format!(
            "Cross sum: left={} + right={} = {}",
            cross.left_sum, cross.right_sum, cross.best.sum
        ),
        snapshot(SubarrayPhase::Cross, Some(mid), Some(cross.best)),
    );

    let sum = lower.sum.max(upper.sum).max(cross.best.sum);
    let best = if sum == lower.sum {
        lower
    } else if sum == upper.sum {
        upper
    } else {
        cross.best
    };
    rec.record(
        format!(
            "Combine: max({}, {}, {}) = {sum}",
            lower.sum, upper.sum, cross.best.sum
        ),
        snapshot(SubarrayPhase::Combine, Some(mid), Some(best)),
    );
    best
}

struct Crossing {
    left_sum: i64,
    right_sum: i64,
    best: Candidate,
}

/// Best subarray that contains both `a[mid]` and `a[mid + 1]`.
fn crossing(a: &[i64], left: usize, mid: usize, right: usize) -> Crossing {
    let (mut left_sum, mut from) = (i64::MIN, mid);
    let mut running = 0i64;
    for i in (left..=mid).rev() {
        running = running.saturating_add(a[i]);
        if running > left_sum {
            left_sum = running;
            from = i;
        }
    }

    let (mut right_sum, mut to) = (i64::MIN, mid + 1);
    running = 0;
    for (j, &value) in a.iter().enumerate().take(right + 1).skip(mid + 1) {
        running = running.saturating_add(value);
        if running > right_sum {
            right_sum = running;
            to = j;
        }
    }

    Crossing {
        left_sum,
        right_sum,
        best: Candidate {
            sum: left_sum.saturating_add(right_sum),
            from,
            to,
        },
    }
}

pub type Matrix = Vec<Vec<i64>>;

/// Two square matrices of the same dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixPair {
    a: Matrix,
    b: Matrix,
}

impl MatrixPair {
    pub fn new(a: Matrix, b: Matrix) -> Result<Self, InputError> {
        ensure_square("a", &a)?;
        ensure_square("b", &b)?;
        if a.len() != b.len() {
            return Err(InputError::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(Self { a, b })
    }

    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    pub fn left(&self) -> &Matrix {
        &self.a
    }

    pub fn right(&self) -> &Matrix {
        &self.b
    }
}

fn ensure_square(field: &'static str, m: &Matrix) -> Result<(), InputError> {
    let expected = m.len();
    match m.iter().position(|row| row.len() != expected) {
        Some(row) => Err(InputError::NotSquare {
            field,
            row,
            len: m[row].len(),
            expected,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixStep {
    /// Operands, present on the opening step only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub left: Matrix,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub right: Matrix,
    pub product: Matrix,
    /// Output cell written by this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
}

/// Square matrix product, listed among the divide-and-conquer algorithms as
/// "Strassen".
///
/// This computes every cell with the direct row-by-column sum (O(n³)); it
/// does not use Strassen's seven-product recursion. Arithmetic saturates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixMultiply;

impl TracedAlgorithm for MatrixMultiply {
    type Input = MatrixPair;
    type Output = Matrix;
    type Step = MatrixStep;

    fn name(&self) -> &'static str {
        "matrix multiply"
    }

    fn execute(&self, pair: &MatrixPair, rec: &mut Recorder<MatrixStep>) -> Matrix {
        let (a, b) = (pair.left(), pair.right());
        let n = pair.dimension();

        match n {
            0 => {
                rec.record("Matrices are empty, nothing to multiply", MatrixStep::default());
                return Vec::new();
            }
            1 => {
                let product = vec![vec![a[0][0].saturating_mul(b[0][0])]];
                rec.record(
                    format!("Base case: {} × {} = {}", a[0][0], b[0][0], product[0][0]),
                    MatrixStep {
                        product: product.clone(),
                        cell: Some((0, 0)),
                        ..MatrixStep::default()
                    },
                );
                return product;
            }
            _ => {}
        }

        let mut product = vec![vec![0i64; n]; n];
        rec.record(
            format!("Multiplying {n}×{n} matrices"),
            MatrixStep {
                left: a.clone(),
                right: b.clone(),
                product: product.clone(),
                cell: None,
            },
        );

        for i in 0..n {
            for j in 0..n {
                product[i][j] = (0..n).fold(0i64, |acc, k| {
                    acc.saturating_add(a[i][k].saturating_mul(b[k][j]))
                });
                rec.record(
                    format!("Computing result[{i}][{j}] = {}", product[i][j]),
                    MatrixStep {
                        product: product.clone(),
                        cell: Some((i, j)),
                        ..MatrixStep::default()
                    },
                );
            }
        }

        rec.record(
            format!("Multiplication complete: {n}×{n} product"),
            MatrixStep {
                product: product.clone(),
                ..MatrixStep::default()
            },
        );
        product
    }

    fn step_hint(&self, pair: &MatrixPair) -> usize {
        pair.dimension() * pair.dimension() + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    #[test]
    fn merge_sort_records_base_cases() {
        let traced = TraceEngine::new(RecursiveMergeSort).run(&[3, 1, 2]);
        assert_eq!(traced.result, vec![1, 2, 3]);
        let bases = traced
            .trace
            .iter()
            .filter(|r| r.narration.starts_with("Base case"))
            .count();
        assert_eq!(bases, 3);
        assert_eq!(traced.trace.last().unwrap().state.array, vec![1, 2, 3]);
    }

    #[test]
    fn quick_sort_reports_final_pivots() {
        let traced = TraceEngine::new(RecursiveQuickSort).run(&[4, 7, 1, 5]);
        assert_eq!(traced.result, vec![1, 4, 5, 7]);
        let first = traced
            .trace
            .iter()
            .find(|r| r.narration.starts_with("Pivot"))
            .unwrap();
        assert_eq!(first.narration, "Pivot 5 is in correct position at index 2");
    }

    #[test]
    fn recursive_binary_search_matches_iterative() {
        let query = SearchQuery::new(vec![19, 3, 11, 7, 1], 11);
        let traced = TraceEngine::new(RecursiveBinarySearch).run(&query);
        assert_eq!(traced.result, SearchOutcome::hit(3));

        let query = SearchQuery::new(vec![2, 4], 3);
        let traced = TraceEngine::new(RecursiveBinarySearch).run(&query);
        assert!(!traced.result.found);
        assert_eq!(traced.trace.last().unwrap().narration, "Target 3 not found in array");
    }

    #[test]
    fn max_subarray_textbook_case() {
        let input = [-2, 1, -3, 4, -1, 2, 1, -5, 4];
        let traced = TraceEngine::new(MaximumSubarray).run(&input);
        assert_eq!(
            traced.result,
            MaxSubarray {
                sum: 6,
                range: Some((3, 6))
            }
        );
        assert_eq!(traced.trace.last().unwrap().state.phase, SubarrayPhase::Done);
    }

    #[test]
    fn max_subarray_prefers_left_on_ties() {
        let traced = TraceEngine::new(MaximumSubarray).run(&[5, -10, 5]);
        assert_eq!(traced.result.range, Some((0, 0)));
    }

    #[test]
    fn max_subarray_all_negative() {
        let traced = TraceEngine::new(MaximumSubarray).run(&[-3, -1, -2]);
        assert_eq!(traced.result.sum, -1);
        assert_eq!(traced.result.range, Some((1, 1)));
    }

    #[test]
    fn max_subarray_empty() {
        let traced = TraceEngine::new(MaximumSubarray).run(&[]);
        assert_eq!(traced.trace.len(), 1);
        assert_eq!(traced.result.sum, 0);
        assert_eq!(traced.result.range, None);
    }

    #[test]
    fn matrix_pair_validation() {
        let err = MatrixPair::new(vec![vec![1, 2], vec![3]], vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(
            err,
            Err(InputError::NotSquare {
                field: "a",
                row: 1,
                len: 1,
                expected: 2
            })
        );
        let err = MatrixPair::new(vec![vec![1]], vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(err, Err(InputError::DimensionMismatch { left: 1, right: 2 }));
    }

    #[test]
    fn multiply_two_by_two() {
        let pair = MatrixPair::new(vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]).unwrap();
        let traced = TraceEngine::new(MatrixMultiply).run(&pair);
        assert_eq!(traced.result, vec![vec![19, 22], vec![43, 50]]);
        // opening step + one per cell + summary
        assert_eq!(traced.trace.len(), 6);
        assert_eq!(traced.trace.get(2).unwrap().narration, "Computing result[0][1] = 22");
    }

    #[test]
    fn multiply_one_by_one_is_a_single_step() {
        let pair = MatrixPair::new(vec![vec![3]], vec![vec![-4]]).unwrap();
        let traced = TraceEngine::new(MatrixMultiply).run(&pair);
        assert_eq!(traced.result, vec![vec![-12]]);
        assert_eq!(traced.trace.len(), 1);
    }
}

//! Comparison sorts that narrate every comparison and every write.
//!
//! All six work on a private copy of the input and sort ascending. Each
//! pairwise comparison, swap, shift, insertion or merge emit is its own step,
//! so the trace length grows with the amount of work done. None of them is
//! guaranteed stable.

use serde::{Deserialize, Serialize};

use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;
use crate::utils::bracketed;

/// Array snapshot plus the indices a viewer should emphasise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortStep {
    /// Full working array at this instant.
    pub array: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comparing: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub swapped: Vec<usize>,
    /// Positions just written by an insertion or a merge.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inserted: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    /// Inclusive index range currently being divided or merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<(usize, usize)>,
    /// Partially merged run (merge sorts only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged: Vec<i64>,
}

impl SortStep {
    /// Plain snapshot with no highlights.
    pub fn of(array: &[i64]) -> Self {
        Self {
            array: array.to_vec(),
            ..Self::default()
        }
    }

    pub fn comparing(array: &[i64], indices: Vec<usize>) -> Self {
        Self {
            comparing: indices,
            ..Self::of(array)
        }
    }

    pub fn swapped(array: &[i64], indices: Vec<usize>) -> Self {
        Self {
            swapped: indices,
            ..Self::of(array)
        }
    }
}

/// Single-step path shared by every sort: nothing to do below two elements.
fn trivially_sorted(array: &[i64], recorder: &mut Recorder<SortStep>) -> bool {
    if array.len() >= 2 {
        return false;
    }
    let narration = match array.len() {
        0 => "Array is empty, nothing to sort".to_string(),
        _ => format!("Array has a single element ({}), already sorted", array[0]),
    };
    recorder.record(narration, SortStep::of(array));
    true
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl TracedAlgorithm for BubbleSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "bubble sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        let n = a.len();
        rec.record("Initial array state", SortStep::of(&a));

        for i in 0..n - 1 {
            let mut swapped_in_pass = false;
            for j in 0..n - 1 - i {
                rec.record(
                    format!(
                        "Comparing elements at index {j} ({}) and {} ({})",
                        a[j],
                        j + 1,
                        a[j + 1]
                    ),
                    SortStep::comparing(&a, vec![j, j + 1]),
                );
                if a[j] > a[j + 1] {
                    a.swap(j, j + 1);
                    swapped_in_pass = true;
                    rec.record(
                        format!(
                            "Swapped {} and {} as {} > {}",
                            a[j + 1],
                            a[j],
                            a[j + 1],
                            a[j]
                        ),
                        SortStep::swapped(&a, vec![j, j + 1]),
                    );
                }
            }
            if !swapped_in_pass {
                rec.record("No swaps in this pass, array is sorted", SortStep::of(&a));
                break;
            }
        }

        rec.record("Sorting complete", SortStep::of(&a));
        a
    }

    fn step_hint(&self, input: &[i64]) -> usize {
        input.len() * input.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl TracedAlgorithm for SelectionSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "selection sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        let n = a.len();
        rec.record("Initial array state", SortStep::of(&a));

        for i in 0..n - 1 {
            let mut min = i;
            rec.record(
                format!(
                    "Assume {} at index {i} is the minimum in the unsorted part",
                    a[i]
                ),
                SortStep {
                    min_index: Some(i),
                    ..SortStep::of(&a)
                },
            );

            for j in i + 1..n {
                rec.record(
                    format!(
                        "Comparing {} at index {j} with current minimum {} at index {min}",
                        a[j], a[min]
                    ),
                    SortStep {
                        min_index: Some(min),
                        ..SortStep::comparing(&a, vec![j, min])
                    },
                );
                if a[j] < a[min] {
                    min = j;
                    rec.record(
                        format!("New minimum found: {} at index {min}", a[min]),
                        SortStep {
                            min_index: Some(min),
                            ..SortStep::of(&a)
                        },
                    );
                }
            }

            if min != i {
                let (low, high) = (a[i], a[min]);
                a.swap(i, min);
                rec.record(
                    format!(
                        "Minimum element {high} found at index {min}. Swapped it with {low} at index {i}."
                    ),
                    SortStep {
                        min_index: Some(i),
                        ..SortStep::swapped(&a, vec![i, min])
                    },
                );
            } else {
                rec.record(
                    format!(
                        "Element {} at index {i} is already in its correct sorted position. No swap needed.",
                        a[i]
                    ),
                    SortStep::of(&a),
                );
            }
        }

        rec.record("Sorting complete", SortStep::of(&a));
        a
    }

    fn step_hint(&self, input: &[i64]) -> usize {
        input.len() * input.len() / 2 + 2 * input.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl TracedAlgorithm for InsertionSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "insertion sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        rec.record("Initial array state", SortStep::of(&a));

        for i in 1..a.len() {
            let key = a[i];
            rec.record(
                format!("Considering element {key} at index {i}. This is the key to be inserted."),
                SortStep::comparing(&a, vec![i]),
            );

            // `hole` is where the key will land once larger elements shift right.
            let mut hole = i;
            while hole > 0 && a[hole - 1] > key {
                rec.record(
                    format!(
                        "Shifting {} at index {} to the right (index {hole}) to make space for {key}",
                        a[hole - 1],
                        hole - 1
                    ),
                    SortStep::comparing(&a, vec![hole - 1, hole]),
                );
                a[hole] = a[hole - 1];
                hole -= 1;
            }
            a[hole] = key;
            rec.record(
                format!("Inserting {key} at its correct sorted position at index {hole}"),
                SortStep {
                    inserted: vec![hole],
                    ..SortStep::of(&a)
                },
            );
        }

        rec.record("Sorting complete", SortStep::of(&a));
        a
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl TracedAlgorithm for MergeSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "merge sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        rec.record("Initial array state", SortStep::of(&a));
        let n = a.len();
        merge_sort_range(&mut a, 0, n, rec);
        rec.record("Sorting complete", SortStep::of(&a));
        a
    }
}

/// Sort `a[lo..hi]` in place, writing merged runs back into `a`.
fn merge_sort_range(a: &mut [i64], lo: usize, hi: usize, rec: &mut Recorder<SortStep>) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    rec.record(
        format!(
            "Dividing {} into left {} and right {}",
            bracketed(&a[lo..hi]),
            bracketed(&a[lo..mid]),
            bracketed(&a[mid..hi])
        ),
        SortStep {
            segment: Some((lo, hi - 1)),
            ..SortStep::of(a)
        },
    );

    merge_sort_range(a, lo, mid, rec);
    merge_sort_range(a, mid, hi, rec);

    let left = a[lo..mid].to_vec();
    let right = a[mid..hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);

    let emit = |a: &mut [i64], k: usize, value: i64, side: &str, rec: &mut Recorder<SortStep>| {
        a[k] = value;
        rec.record(
            format!("Placed {value} from the {side} half at index {k}"),
            SortStep {
                inserted: vec![k],
                segment: Some((lo, hi - 1)),
                merged: a[lo..=k].to_vec(),
                ..SortStep::of(a)
            },
        );
    };

    while i < left.len() && j < right.len() {
        rec.record(
            format!("Merging: comparing {} (left) and {} (right)", left[i], right[j]),
            SortStep {
                segment: Some((lo, hi - 1)),
                merged: a[lo..k].to_vec(),
                ..SortStep::of(a)
            },
        );
        if left[i] <= right[j] {
            emit(a, k, left[i], "left", rec);
            i += 1;
        } else {
            emit(a, k, right[j], "right", rec);
            j += 1;
        }
        k += 1;
    }
    for &value in &left[i..] {
        emit(a, k, value, "left", rec);
        k += 1;
    }
    for &value in &right[j..] {
        emit(a, k, value, "right", rec);
        k += 1;
    }

    rec.record(
        format!(
            "Merged {} and {} into {}",
            bracketed(&left),
            bracketed(&right),
            bracketed(&a[lo..hi])
        ),
        SortStep {
            segment: Some((lo, hi - 1)),
            ..SortStep::of(a)
        },
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl TracedAlgorithm for QuickSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "quick sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        rec.record("Initial array state", SortStep::of(&a));
        let high = a.len() - 1;
        quick_sort_range(&mut a, 0, high, rec);
        rec.record("Sorting complete", SortStep::of(&a));
        a
    }
}

fn quick_sort_range(a: &mut [i64], low: usize, high: usize, rec: &mut Recorder<SortStep>) {
    if low >= high {
        return;
    }
    let p = partition(a, low, high, rec);
    if p > low {
        quick_sort_range(a, low, p - 1, rec);
    }
    quick_sort_range(a, p + 1, high, rec);
}

/// Lomuto partition around `a[high]`; returns the pivot's final index.
fn partition(a: &mut [i64], low: usize, high: usize, rec: &mut Recorder<SortStep>) -> usize {
    let pivot = a[high];
    rec.record(
        format!(
            "Selecting pivot: {pivot} at index {high}. Elements smaller than pivot will go to its left, larger to its right."
        ),
        SortStep {
            pivot: Some(high),
            ..SortStep::of(a)
        },
    );

    let mut store = low;
    for j in low..high {
        rec.record(
            format!("Comparing {} at index {j} with pivot {pivot}", a[j]),
            SortStep {
                pivot: Some(high),
                ..SortStep::comparing(a, vec![j])
            },
        );
        if a[j] < pivot {
            let (x, y) = (a[store], a[j]);
            a.swap(store, j);
            rec.record(
                format!("Element {y} is smaller than pivot. Swapped {x} and {y}."),
                SortStep {
                    pivot: Some(high),
                    ..SortStep::swapped(a, vec![store, j])
                },
            );
            store += 1;
        }
    }

    let displaced = a[store];
    a.swap(store, high);
    rec.record(
        format!(
            "Placed pivot {pivot} at its correct position (index {store}), swapping it with {displaced}."
        ),
        SortStep {
            pivot: Some(store),
            ..SortStep::swapped(a, vec![store, high])
        },
    );
    store
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl TracedAlgorithm for HeapSort {
    type Input = [i64];
    type Output = Vec<i64>;
    type Step = SortStep;

    fn name(&self) -> &'static str {
        "heap sort"
    }

    fn execute(&self, input: &[i64], rec: &mut Recorder<SortStep>) -> Vec<i64> {
        let mut a = input.to_vec();
        if trivially_sorted(&a, rec) {
            return a;
        }
        let n = a.len();

        rec.record("Building initial Max Heap from the array.", SortStep::of(&a));
        for root in (0..n / 2).rev() {
            heapify(&mut a, n, root, rec);
        }
        rec.record("Max Heap built. Starting sorting phase.", SortStep::of(&a));

        for end in (1..n).rev() {
            let (top, last) = (a[0], a[end]);
            a.swap(0, end);
            rec.record(
                format!(
                    "Swapped root {top} (largest element) with last element {last} of unsorted part."
                ),
                SortStep::swapped(&a, vec![0, end]),
            );
            heapify(&mut a, end, 0, rec);
        }

        rec.record("Sorting complete", SortStep::of(&a));
        a
    }
}

/// Sift `a[root]` down within the heap prefix `a[..len]`.
fn heapify(a: &mut [i64], len: usize, root: usize, rec: &mut Recorder<SortStep>) {
    let mut root = root;
    loop {
        let left = 2 * root + 1;
        let right = 2 * root + 2;
        let family: Vec<usize> = [root, left, right]
            .into_iter()
            .filter(|&idx| idx < len)
            .collect();
        let child = |idx: usize| {
            if idx < len {
                a[idx].to_string()
            } else {
                "N/A".to_string()
            }
        };
        rec.record(
            format!(
                "Heapify: Considering subtree with root {} at index {root}. Children: left ({}) at {left}, right ({}) at {right}.",
                a[root],
                child(left),
                child(right)
            ),
            SortStep::comparing(a, family.clone()),
        );

        let mut largest = root;
        if left < len && a[left] > a[largest] {
            rec.record(
                format!(
                    "Left child {} is larger than current largest {}. New largest is {} at index {left}.",
                    a[left], a[largest], a[left]
                ),
                SortStep::comparing(a, family.clone()),
            );
            largest = left;
        }
        if right < len && a[right] > a[largest] {
            rec.record(
                format!(
                    "Right child {} is larger than current largest {}. New largest is {} at index {right}.",
                    a[right], a[largest], a[right]
                ),
                SortStep::comparing(a, family.clone()),
            );
            largest = right;
        }
        if largest == root {
            return;
        }

        let (parent, big) = (a[root], a[largest]);
        a.swap(root, largest);
        rec.record(
            format!(
                "Largest element {big} is not root. Swapped {parent} (root) and {big} (largest child)."
            ),
            SortStep::swapped(a, vec![root, largest]),
        );
        root = largest;
    }
}

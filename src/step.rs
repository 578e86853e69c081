//! Family-independent step type.
//!
//! Registry entry points lift their family-specific traces into [`Step`] so a
//! single [`crate::PlaybackController`] can replay any of them.

use serde::{Deserialize, Serialize};

use crate::algorithms::divide_conquer::{MatrixStep, SubarrayStep};
use crate::algorithms::dynamic::DpStep;
use crate::algorithms::graph::GraphStep;
use crate::algorithms::greedy::GreedyStep;
use crate::algorithms::searching::SearchStep;
use crate::algorithms::sorting::SortStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "state", rename_all = "snake_case")]
pub enum Step {
    Sort(SortStep),
    Search(SearchStep),
    Graph(GraphStep),
    Subarray(SubarrayStep),
    Matrix(MatrixStep),
    Dp(DpStep),
    Greedy(GreedyStep),
}

macro_rules! impl_from_step {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Step {
                fn from(step: $ty) -> Self {
                    Step::$variant(step)
                }
            }
        )*
    };
}

impl_from_step! {
    Sort => SortStep,
    Search => SearchStep,
    Graph => GraphStep,
    Subarray => SubarrayStep,
    Matrix => MatrixStep,
    Dp => DpStep,
    Greedy => GreedyStep,
}

//! Example: Longest Common Subsequence with the DP table at each step.
//!
//! Run with:
//! `cargo run --example lcs`

use algo_trace::{
    algorithms::dynamic::{DpTable, Focus, Lcs, LcsInput},
    TraceEngine,
};

fn main() {
    let traced = TraceEngine::new(Lcs).run(&LcsInput::new("ABCBDAB", "BDCABA"));

    // Show only the cells where a match extended the diagonal.
    for record in &traced.trace {
        if let (Some(Focus::Cell(i, j)), DpTable::Grid(dp)) = (record.state.focus, &record.state.table) {
            if dp[i][j] > dp[i - 1][j].max(dp[i][j - 1]) {
                println!("dp[{i}][{j}] = {:2}  {}", dp[i][j], record.narration);
            }
        }
    }

    println!("LCS length: {}", traced.result.length);
    println!("LCS: {}", traced.result.subsequence);
}

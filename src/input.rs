//! Free-text input parsing.
//!
//! Everything here runs before an algorithm does: malformed text becomes an
//! [`InputError`] and no trace is produced. Blank entries in comma separated
//! lists are skipped, so `"1, 2,,3"` is `[1, 2, 3]`. An empty list is valid
//! and leads to the degenerate single-step trace.
//!
//! Record formats:
//!
//! | field        | format                  | example            |
//! |--------------|-------------------------|--------------------|
//! | `edges`      | `u-v` or `u-v-w`        | `0-1,1-2-5`        |
//! | `a`, `b`     | rows split by `;`       | `1,2;3,4`          |
//! | `activities` | `name:start-finish`     | `A1:1-4,A2:3-5`    |
//! | `items`      | `name:weight:value`     | `a:10:60`          |
//! | `symbols`    | `symbol:frequency`      | `a:45,b:13`        |
//! | `jobs`       | `name:deadline:profit`  | `J1:2:100`         |

use std::collections::HashSet;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::algorithms::divide_conquer::{Matrix, MatrixPair};
use crate::algorithms::dynamic::{
    CoinInput, KnapsackInput, KnapsackItem, LcsInput, MAX_FIBONACCI_INDEX,
};
use crate::algorithms::graph::{Edge, Graph, GraphRun};
use crate::algorithms::greedy::{Activity, FractionalInput, FractionalItem, Job, Symbol};
use crate::algorithms::searching::SearchQuery;
use crate::error::InputError;
use crate::registry::{AlgorithmArgs, ArgsKind};

/// Named raw fields, e.g. `values => "5,2,8"`.
pub type Fields = IndexMap<String, String>;

// Table algorithms record a full copy of the table per step, so trace size
// grows with the square of these.

/// Largest 0/1 knapsack capacity.
pub const MAX_KNAPSACK_CAPACITY: u64 = 100;
pub const MAX_COIN_AMOUNT: u64 = 500;
pub const MAX_DEADLINE: u64 = 1_000;
/// Graph steps copy the visited set and frontier.
pub const MAX_VERTICES: u64 = 500;
/// Longest LCS operand, in characters.
pub const MAX_LCS_LEN: u64 = 40;

/// Build typed arguments of `kind` from raw named fields.
pub fn parse_args(kind: ArgsKind, fields: &Fields) -> Result<AlgorithmArgs, InputError> {
    let args = match kind {
        ArgsKind::Values => AlgorithmArgs::Values(parse_numbers("values", field(fields, "values")?)?),
        ArgsKind::Search => AlgorithmArgs::Search(SearchQuery::new(
            parse_numbers::<i64>("values", field(fields, "values")?)?,
            parse_scalar("target", field(fields, "target")?)?,
        )),
        ArgsKind::Graph => AlgorithmArgs::Graph(parse_graph(
            field(fields, "vertices")?,
            field(fields, "edges")?,
            field(fields, "start")?,
        )?),
        ArgsKind::Matrices => AlgorithmArgs::Matrices(MatrixPair::new(
            parse_matrix("a", field(fields, "a")?)?,
            parse_matrix("b", field(fields, "b")?)?,
        )?),
        ArgsKind::Index => {
            let n = parse_scalar("n", field(fields, "n")?)?;
            AlgorithmArgs::Index(at_most("n", n, MAX_FIBONACCI_INDEX)?)
        }
        ArgsKind::Knapsack => AlgorithmArgs::Knapsack(parse_knapsack(
            field(fields, "weights")?,
            field(fields, "values")?,
            field(fields, "capacity")?,
        )?),
        ArgsKind::Strings => {
            let first = field(fields, "first")?.trim();
            let second = field(fields, "second")?.trim();
            at_most("first", first.chars().count() as u64, MAX_LCS_LEN)?;
            at_most("second", second.chars().count() as u64, MAX_LCS_LEN)?;
            AlgorithmArgs::Strings(LcsInput::new(first, second))
        }
        ArgsKind::Coins => {
            let coins = parse_numbers("coins", field(fields, "coins")?)?;
            let amount = parse_scalar("amount", field(fields, "amount")?)?;
            AlgorithmArgs::Coins(CoinInput {
                coins,
                amount: at_most("amount", amount, MAX_COIN_AMOUNT)? as usize,
            })
        }
        ArgsKind::Activities => {
            AlgorithmArgs::Activities(parse_activities(field(fields, "activities")?)?)
        }
        ArgsKind::FractionalKnapsack => AlgorithmArgs::FractionalKnapsack(FractionalInput {
            items: parse_items(field(fields, "items")?)?,
            capacity: parse_quantity("capacity", field(fields, "capacity")?)?,
        }),
        ArgsKind::Frequencies => AlgorithmArgs::Frequencies(parse_symbols(field(fields, "symbols")?)?),
        ArgsKind::Jobs => AlgorithmArgs::Jobs(parse_jobs(field(fields, "jobs")?)?),
    };
    Ok(args)
}

fn field<'a>(fields: &'a Fields, name: &'static str) -> Result<&'a str, InputError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or(InputError::MissingField { field: name })
}

fn at_most(field: &'static str, value: u64, max: u64) -> Result<u64, InputError> {
    if value > max {
        return Err(InputError::OutOfRange { field, value, max });
    }
    Ok(value)
}

fn number<T: FromStr>(field: &'static str, token: &str) -> Result<T, InputError> {
    token.trim().parse().map_err(|_| InputError::NonNumeric {
        field,
        token: token.trim().to_owned(),
    })
}

/// Non-blank, trimmed entries of a comma separated list.
fn entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Comma separated numbers; blanks are skipped and an empty list is allowed.
pub fn parse_numbers<T: FromStr>(field: &'static str, text: &str) -> Result<Vec<T>, InputError> {
    entries(text).map(|token| number(field, token)).collect()
}

/// A single required number.
pub fn parse_scalar<T: FromStr>(field: &'static str, text: &str) -> Result<T, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::EmptyField { field });
    }
    number(field, text)
}

/// A finite, non-negative real quantity.
fn parse_quantity(field: &'static str, text: &str) -> Result<f64, InputError> {
    let value: f64 = parse_scalar(field, text)?;
    if !value.is_finite() || value < 0.0 {
        return Err(InputError::NonNumeric {
            field,
            token: text.trim().to_owned(),
        });
    }
    Ok(value)
}

pub fn parse_edges(text: &str) -> Result<Vec<Edge>, InputError> {
    entries(text)
        .map(|token| {
            let malformed = || InputError::MalformedEdge {
                token: token.to_owned(),
            };
            let parts: Vec<&str> = token.split('-').map(str::trim).collect();
            let vertex = |s: &str| s.parse::<usize>().map_err(|_| malformed());
            match parts.as_slice() {
                [u, v] => Ok(Edge::new(vertex(*u)?, vertex(*v)?)),
                [u, v, w] => Ok(Edge::weighted(
                    vertex(*u)?,
                    vertex(*v)?,
                    w.parse().map_err(|_| malformed())?,
                )),
                _ => Err(malformed()),
            }
        })
        .collect()
}

pub fn parse_graph(vertices: &str, edges: &str, start: &str) -> Result<GraphRun, InputError> {
    let vertices: u64 = parse_scalar("vertices", vertices)?;
    if vertices == 0 {
        return Err(InputError::InvalidVertexCount);
    }
    let vertices = at_most("vertices", vertices, MAX_VERTICES)? as usize;
    let start: usize = parse_scalar("start", start)?;
    let graph = Graph::new(vertices, parse_edges(edges)?)?;
    GraphRun::new(graph, start)
}

/// Rows separated by `;`, cells by `,`.
pub fn parse_matrix(field: &'static str, text: &str) -> Result<Matrix, InputError> {
    text.split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| parse_numbers(field, row))
        .collect()
}

pub fn parse_knapsack(weights: &str, values: &str, capacity: &str) -> Result<KnapsackInput, InputError> {
    let weights: Vec<u64> = parse_numbers("weights", weights)?;
    let values: Vec<u64> = parse_numbers("values", values)?;
    if weights.len() != values.len() {
        return Err(InputError::LengthMismatch {
            left: "weights",
            left_len: weights.len(),
            right: "values",
            right_len: values.len(),
        });
    }
    let capacity = at_most(
        "capacity",
        parse_scalar("capacity", capacity)?,
        MAX_KNAPSACK_CAPACITY,
    )?;
    Ok(KnapsackInput {
        items: weights
            .into_iter()
            .zip(values)
            .map(|(weight, value)| KnapsackItem { weight, value })
            .collect(),
        capacity: capacity as usize,
    })
}

/// Split `token` into exactly `N` colon separated parts.
fn record<'a, const N: usize>(
    field: &'static str,
    token: &'a str,
    expected: &'static str,
) -> Result<[&'a str; N], InputError> {
    let malformed = || InputError::MalformedRecord {
        field,
        token: token.to_owned(),
        expected,
    };
    let parts: Vec<&str> = token.split(':').map(str::trim).collect();
    let parts: [&str; N] = parts.try_into().map_err(|_| malformed())?;
    if parts[0].is_empty() {
        return Err(malformed());
    }
    Ok(parts)
}

pub fn parse_activities(text: &str) -> Result<Vec<Activity>, InputError> {
    const FIELD: &str = "activities";
    const EXPECTED: &str = "name:start-finish";
    entries(text)
        .map(|token| {
            let [name, span] = record::<2>(FIELD, token, EXPECTED)?;
            let (start, finish) = span.split_once('-').ok_or_else(|| InputError::MalformedRecord {
                field: FIELD,
                token: token.to_owned(),
                expected: EXPECTED,
            })?;
            let start: u64 = number(FIELD, start)?;
            let finish: u64 = number(FIELD, finish)?;
            if finish < start {
                return Err(InputError::InvalidInterval {
                    name: name.to_owned(),
                    start,
                    finish,
                });
            }
            Ok(Activity::new(name, start, finish))
        })
        .collect()
}

pub fn parse_items(text: &str) -> Result<Vec<FractionalItem>, InputError> {
    entries(text)
        .map(|token| {
            let [name, weight, value] = record::<3>("items", token, "name:weight:value")?;
            let weight: f64 = number("items", weight)?;
            if !weight.is_finite() || weight <= 0.0 {
                return Err(InputError::ZeroWeight {
                    name: name.to_owned(),
                });
            }
            let value = parse_quantity("items", value)?;
            Ok(FractionalItem::new(name, weight, value))
        })
        .collect()
}

/// Huffman symbols; each symbol may appear once since codes are keyed by it.
pub fn parse_symbols(text: &str) -> Result<Vec<Symbol>, InputError> {
    let mut seen = HashSet::new();
    entries(text)
        .map(|token| {
            let [symbol, frequency] = record::<2>("symbols", token, "symbol:frequency")?;
            if !seen.insert(symbol) {
                return Err(InputError::DuplicateSymbol {
                    symbol: symbol.to_owned(),
                });
            }
            Ok(Symbol::new(symbol, number("symbols", frequency)?))
        })
        .collect()
}

pub fn parse_jobs(text: &str) -> Result<Vec<Job>, InputError> {
    entries(text)
        .map(|token| {
            let [name, deadline, profit] = record::<3>("jobs", token, "name:deadline:profit")?;
            let deadline = at_most("deadline", number("jobs", deadline)?, MAX_DEADLINE)?;
            Ok(Job::new(name, deadline, number("jobs", profit)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn numbers_skip_blanks() {
        assert_eq!(parse_numbers::<i64>("values", " 5, 2,,8 , -1 ").unwrap(), vec![5, 2, 8, -1]);
        assert!(parse_numbers::<i64>("values", "").unwrap().is_empty());
    }

    #[test]
    fn non_numeric_token_is_named() {
        let err = parse_numbers::<i64>("values", "1,two,3").unwrap_err();
        assert_eq!(
            err,
            InputError::NonNumeric {
                field: "values",
                token: "two".into()
            }
        );
    }

    #[test]
    fn empty_target_is_rejected() {
        let err = parse_args(ArgsKind::Search, &fields(&[("values", "1,2"), ("target", " ")]));
        assert_eq!(err, Err(InputError::EmptyField { field: "target" }));
    }

    #[test]
    fn missing_field() {
        let err = parse_args(ArgsKind::Search, &fields(&[("values", "1,2")]));
        assert_eq!(err, Err(InputError::MissingField { field: "target" }));
    }

    #[test]
    fn edges_with_and_without_weights() {
        let edges = parse_edges("0-1, 1-2-7").unwrap();
        assert_eq!(edges, vec![Edge::new(0, 1), Edge::weighted(1, 2, 7)]);
        for bad in ["0", "0-1-2-3", "a-b", "0--1"] {
            assert!(matches!(parse_edges(bad), Err(InputError::MalformedEdge { .. })), "{bad}");
        }
    }

    #[test]
    fn graph_validation() {
        assert_eq!(parse_graph("0", "", "0"), Err(InputError::InvalidVertexCount));
        assert_eq!(
            parse_graph("3", "0-5", "0"),
            Err(InputError::VertexOutOfRange {
                vertex: 5,
                vertices: 3
            })
        );
        assert!(parse_graph("3", "0-1", "3").is_err());
        assert_eq!(parse_graph("4", "0-1,1-2", "2").unwrap().start(), 2);
    }

    #[test]
    fn matrices() {
        assert_eq!(parse_matrix("a", "1,2; 3,4").unwrap(), vec![vec![1, 2], vec![3, 4]]);
        let err = parse_args(ArgsKind::Matrices, &fields(&[("a", "1,2;3"), ("b", "1,2;3,4")]));
        assert!(matches!(err, Err(InputError::NotSquare { field: "a", .. })));
    }

    #[test]
    fn fibonacci_index_is_bounded() {
        let ok = parse_args(ArgsKind::Index, &fields(&[("n", "93")])).unwrap();
        assert_eq!(ok, AlgorithmArgs::Index(93));
        let err = parse_args(ArgsKind::Index, &fields(&[("n", "94")]));
        assert_eq!(
            err,
            Err(InputError::OutOfRange {
                field: "n",
                value: 94,
                max: 93
            })
        );
    }

    #[test]
    fn knapsack_lengths_must_agree() {
        let err = parse_knapsack("1,2", "3", "5").unwrap_err();
        assert!(matches!(err, InputError::LengthMismatch { left_len: 2, right_len: 1, .. }));
        let ok = parse_knapsack("1,2", "3,4", "5").unwrap();
        assert_eq!(ok.items[1], KnapsackItem { weight: 2, value: 4 });
    }

    #[test]
    fn activity_records() {
        let acts = parse_activities("A1:1-4, A2 : 3-5").unwrap();
        assert_eq!(acts[1], Activity::new("A2", 3, 5));
        assert!(matches!(
            parse_activities("A1:4-1"),
            Err(InputError::InvalidInterval { start: 4, finish: 1, .. })
        ));
        assert!(matches!(
            parse_activities("A1-4"),
            Err(InputError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn item_weight_must_be_positive() {
        assert_eq!(
            parse_items("a:0:5"),
            Err(InputError::ZeroWeight { name: "a".into() })
        );
        let items = parse_items("a:2.5:10").unwrap();
        assert_eq!(items[0].weight, 2.5);
    }

    #[test]
    fn vertex_count_is_capped() {
        assert_eq!(
            parse_graph("10000000000", "", "0"),
            Err(InputError::OutOfRange {
                field: "vertices",
                value: 10_000_000_000,
                max: MAX_VERTICES
            })
        );
        let largest = MAX_VERTICES.to_string();
        assert_eq!(parse_graph(&largest, "0-1", "0").unwrap().graph().vertex_count(), 500);
    }

    #[test]
    fn repeated_symbols_are_rejected() {
        assert_eq!(
            parse_symbols("a:1, b:3, a:2"),
            Err(InputError::DuplicateSymbol { symbol: "a".into() })
        );
        assert_eq!(parse_symbols("a:1,A:2").unwrap().len(), 2);
    }

    #[test]
    fn symbols_and_jobs() {
        assert_eq!(parse_symbols("a:45,b:13").unwrap()[1], Symbol::new("b", 13));
        assert!(parse_symbols(":4").is_err());
        assert_eq!(parse_jobs("J1:2:100").unwrap()[0], Job::new("J1", 2, 100));
        assert!(matches!(
            parse_jobs("J1:5000:1"),
            Err(InputError::OutOfRange { field: "deadline", .. })
        ));
    }

    #[test]
    fn strings_are_trimmed() {
        let args = parse_args(ArgsKind::Strings, &fields(&[("first", " AB "), ("second", "B")]));
        assert_eq!(args, Ok(AlgorithmArgs::Strings(LcsInput::new("AB", "B"))));
    }
}

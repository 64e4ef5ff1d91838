//! Golden-file runner over `fixtures/manifest.json`.
//!
//! Every case transpiles its schema and either compares the declarations
//! (header stripped) against the expected `.ts` file, or checks the error kind.
//! Successful cases are also checked for byte-identical reruns and for each
//! exported label appearing exactly once.
mod path_de;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use gql_tg::{EmissionOrder, TranspileOptions};

static GENERATED_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^/\*.*?\*/\n\n?").unwrap());
static EXPORTED_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export (?:interface|enum|type) (\w+)").unwrap());

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Case {
    name: String,
    schema: PathBuf,
    #[serde(default)]
    expected: Option<PathBuf>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    order: Order,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Order {
    #[default]
    Declaration,
    Dependencies,
}

impl From<Order> for EmissionOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Declaration => EmissionOrder::Declaration,
            Order::Dependencies => EmissionOrder::Dependencies,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Case {
    fn run(&self, fixtures: &Path) -> Result<(), String> {
        let schema_path = fixtures.join(&self.schema);
        let source = gql_tg::io::read_schema(&schema_path).map_err(|error| error.to_string())?;
        let order = EmissionOrder::from(self.order);

        let with_header = gql_tg::transpile_source(&source, &TranspileOptions::default().with_order(order));
        let bare = gql_tg::transpile_source(&source, &TranspileOptions::bare().with_order(order));

        match (&self.expected, &self.error, with_header, bare) {
            (Some(expected), None, Ok(with_header), Ok(bare)) => {
                let expected = std::fs::read_to_string(fixtures.join(expected))
                    .map_err(|error| format!("expected file: {error}"))?;
                let stripped = GENERATED_HEADER.replace(&with_header.output, "");
                if stripped != expected {
                    return Err(format!("output mismatch\n--- expected\n{expected}\n--- actual\n{stripped}"));
                }
                if bare.output != expected {
                    return Err("header-less output differs from expected".to_string());
                }
                let rerun = gql_tg::transpile_source(&source, &TranspileOptions::bare().with_order(order))
                    .map_err(|error| error.to_string())?;
                if rerun != bare {
                    return Err("rerun is not byte-identical".to_string());
                }
                check_exactly_once(&bare.output, bare.declarations)
            }
            (None, Some(kind), Err(error), _) if error.kind() == kind.as_str() => Ok(()),
            (None, Some(kind), Err(error), _) => Err(format!("expected {kind}, got {}: {error}", error.kind())),
            (None, Some(kind), Ok(_), _) => Err(format!("expected {kind}, but transpiling succeeded")),
            (Some(_), None, Err(error), _) | (Some(_), None, _, Err(error)) => {
                Err(format!("unexpected {}: {error}", error.kind()))
            }
            _ => Err("a case needs exactly one of `expected` or `error`".to_string()),
        }
    }
}

fn check_exactly_once(output: &str, declarations: usize) -> Result<(), String> {
    let mut seen = HashSet::new();
    for captures in EXPORTED_LABEL.captures_iter(output) {
        let label = &captures[1];
        if !seen.insert(label.to_string()) {
            return Err(format!("`{label}` emitted more than once"));
        }
    }
    if seen.len() != declarations {
        return Err(format!("{} exports but {declarations} declarations reported", seen.len()));
    }
    Ok(())
}

fn main() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let manifest_src = std::fs::read_to_string(fixtures.join("manifest.json")).unwrap();
    let manifest: Manifest = match path_de::from_str_with_path(&manifest_src) {
        Ok(x) => x,
        Err(error) => {
            eprintln!("❌ invalid manifest: {error}");
            std::process::exit(2);
        }
    };

    let mut failures = 0;
    for case in &manifest.cases {
        match case.run(&fixtures) {
            Ok(()) => eprintln!("✅ {}", case.name),
            Err(error) => {
                failures += 1;
                eprintln!("❌ {}: {error}", case.name);
            }
        }
    }

    eprintln!("{} passed, {failures} failed", manifest.cases.len() - failures);
    if failures > 0 {
        std::process::exit(1);
    }
}

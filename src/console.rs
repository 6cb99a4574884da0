//! Line commands of the interactive console.

use crate::ast::Condition;
use crate::catalog::{self, AssetFilter, HealthFilter, ViewSelection};
use crate::model::{Asset, CatalogSnapshot};
use crate::parser::parse_query;

pub const HELP: &str = "\
<query>          evaluate a selection query, e.g. kind:\"dbt\" and group:\"core\"
:views           list saved catalog views
:view ID         show a catalog view (or `all`, `favorites`)
:search TEXT     narrow by key path or description (no text clears)
:health STATE    all | healthy | warning | degraded
:explain QUERY   show how a query is parsed
:quit            leave";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Query(&'a str),
    Views,
    View(&'a str),
    Search(&'a str),
    Health(&'a str),
    Explain(&'a str),
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Command::Query(line);
        };
        let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        let arg = arg.trim();
        match name {
            "views" => Command::Views,
            "view" => Command::View(arg),
            "search" => Command::Search(arg),
            "health" => Command::Health(arg),
            "explain" => Command::Explain(arg),
            "help" | "h" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(name),
        }
    }
}

pub enum Outcome {
    Print(Vec<String>),
    Quit,
}

/// Console state: the snapshot and the list filter being built up.
pub struct Session {
    snapshot: CatalogSnapshot,
    filter: AssetFilter,
}

impl Session {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot, filter: AssetFilter::default() }
    }

    pub fn filter(&self) -> &AssetFilter {
        &self.filter
    }

    pub fn execute(&mut self, line: &str) -> Outcome {
        let lines = match Command::parse(line) {
            Command::Query("") => Vec::new(),
            Command::Query(query) => self.run_query(query),
            Command::Views => self.list_views(),
            Command::View(id) => {
                self.filter.view = ViewSelection::from(if id.is_empty() { "all" } else { id });
                self.listing(self.filter.apply(&self.snapshot))
            }
            Command::Search(text) => {
                self.filter.search = (!text.is_empty()).then(|| text.to_string());
                self.listing(self.filter.apply(&self.snapshot))
            }
            Command::Health(state) => match state.parse::<HealthFilter>() {
                Ok(health) => {
                    self.filter.health = health;
                    self.listing(self.filter.apply(&self.snapshot))
                }
                Err(e) => vec![e.to_string()],
            },
            Command::Explain(query) => explain(query),
            Command::Help => HELP.lines().map(str::to_string).collect(),
            Command::Quit => return Outcome::Quit,
            Command::Unknown(name) => vec![format!("unknown command :{name}, try :help")],
        };
        Outcome::Print(lines)
    }

    /// Runs an ad hoc query over the assets left by search and health.
    fn run_query(&self, query: &str) -> Vec<String> {
        let narrowed = AssetFilter { view: ViewSelection::All, ..self.filter.clone() };
        let selected = catalog::select(narrowed.apply(&self.snapshot), &parse_query(query));
        self.listing(selected)
    }

    fn list_views(&self) -> Vec<String> {
        if self.snapshot.catalog_views.is_empty() {
            return vec!["no catalog views".to_string()];
        }
        self.snapshot
            .catalog_views
            .iter()
            .map(|v| {
                let query = v.selection.query_selection.as_deref().unwrap_or("");
                format!("{}\t{}\t{}", v.id, v.name, query)
            })
            .collect()
    }

    fn listing(&self, assets: Vec<&Asset>) -> Vec<String> {
        let mut lines: Vec<String> = assets.iter().map(|a| a.key.dotted()).collect();
        lines.push(format!("{} of {} assets", assets.len(), self.snapshot.assets.len()));
        lines
    }
}

/// One line per OR-clause, conditions joined with `and`.
pub fn explain(query: &str) -> Vec<String> {
    let parsed = parse_query(query);
    if parsed.is_empty() {
        return vec!["empty query: matches every asset".to_string()];
    }
    parsed
        .clauses
        .iter()
        .enumerate()
        .map(|(i, clause)| {
            let conditions: Vec<String> = clause.conditions.iter().map(describe).collect();
            format!("{}. {}", i + 1, conditions.join(" AND "))
        })
        .collect()
}

fn describe(condition: &Condition) -> String {
    match condition {
        Condition::UpstreamKey(_) | Condition::DownstreamKey(_) => {
            format!("{} (exact key only, dependencies not followed)", condition)
        }
        Condition::Unrecognized(_) => format!("{:?} (unrecognized, always matches)", condition.to_string()),
        _ => condition.to_string(),
    }
}

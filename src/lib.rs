#![deny(clippy::all)]

use anyhow::anyhow;
use clap::{value_t, App, Arg, ArgMatches};
use lazy_static::lazy_static;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};

use geometry::{Location, StreetMap};
use searcher::{
    astar, search, Discipline, SearchOptions, SearchOutcome, SearchResult, Termination,
};

type Error = anyhow::Error;

/// A way of searching the street map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    AStar,
}

lazy_static! {
    static ref STRATEGIES: BTreeMap<&'static str, Strategy> = {
        let mut s = BTreeMap::new();
        s.insert("bfs", Strategy::BreadthFirst);
        s.insert("dfs", Strategy::DepthFirst);
        s.insert("ucs", Strategy::UniformCost);
        s.insert("astar", Strategy::AStar);
        s
    };
}

impl Strategy {
    pub fn discipline(self) -> Discipline {
        match self {
            Strategy::BreadthFirst => Discipline::Fifo,
            Strategy::DepthFirst => Discipline::Lifo,
            Strategy::UniformCost | Strategy::AStar => Discipline::Priority,
        }
    }

    /// Find a route on this map. Only A* uses a heuristic, and
    /// it gets a fresh one for every search.
    pub fn run(
        self,
        map: &StreetMap,
        start: &str,
        goal: &str,
        options: &SearchOptions,
    ) -> SearchResult<SearchOutcome<Location>> {
        let options = SearchOptions {
            discipline: self.discipline(),
            ..*options
        };

        match self {
            Strategy::AStar => astar(map, start, goal, &options),
            _ => search(map, start, goal, &options),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "Breadth-first"),
            Strategy::DepthFirst => write!(f, "Depth-first"),
            Strategy::UniformCost => write!(f, "Uniform cost"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RoadtripError {
    #[error("Unknown search strategy: {0} (expected one of bfs, dfs, ucs, astar)")]
    UnknownStrategy(String),

    #[error("Map not found: {0}")]
    MapNotFound(String, #[source] io::Error),

    #[error("No path found from {0} to {1}")]
    NoPath(String, String),
}

/// Everything the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the map, or None to read from stdin.
    pub map: Option<String>,
    pub start: String,
    pub goal: String,
    pub strategies: Vec<Strategy>,
    pub options: SearchOptions,
    pub show_bounds: bool,
    pub verbosity: u64,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        let strategies = matches
            .values_of("strategy")
            .map(|values| {
                values
                    .map(|v| {
                        STRATEGIES
                            .get(v.to_ascii_lowercase().as_str())
                            .copied()
                            .ok_or_else(|| RoadtripError::UnknownStrategy(v.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_else(|| vec![Strategy::AStar]);

        let options = SearchOptions::default()
            .with_limit(value_t!(matches, "limit", usize)?)
            .with_repeated_state_checking(!matches.is_present("no-repeated-state-checking"));

        Ok(Config {
            map: matches
                .value_of("map")
                .filter(|m| *m != "-")
                .map(|m| m.to_string()),
            start: matches.value_of("start").unwrap_or_default().to_string(),
            goal: matches.value_of("goal").unwrap_or_default().to_string(),
            strategies,
            options,
            show_bounds: matches.is_present("bounds"),
            verbosity: matches.occurrences_of("verbose"),
        })
    }
}

pub fn app() -> App<'static, 'static> {
    App::new("roadtrip")
        .version("0.1.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Find routes between locations on a street map")
        .arg(
            Arg::with_name("map")
                .value_name("MAP")
                .help("Street map to search, or - for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("start")
                .value_name("START")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("goal")
                .value_name("GOAL")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .value_name("STRATEGY")
                .help("bfs, dfs, ucs or astar. May be given more than once.")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .default_value("astar"),
        )
        .arg(
            Arg::with_name("limit")
                .short("l")
                .long("limit")
                .value_name("EXPANSIONS")
                .help("Give up after expanding this many nodes")
                .takes_value(true)
                .default_value("10000"),
        )
        .arg(
            Arg::with_name("no-repeated-state-checking")
                .long("no-repeated-state-checking")
                .help("Allow locations to be revisited"),
        )
        .arg(
            Arg::with_name("bounds")
                .long("bounds")
                .help("Print the extent of the map"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more, repeat for even more"),
        )
}

fn init_tracing(verbosity: u64) -> Result<(), Error> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

pub fn read_map(filename: Option<&str>) -> Result<StreetMap, Error> {
    let map = match filename {
        Some(path) => {
            let f = File::open(path).map_err(|e| RoadtripError::MapNotFound(path.to_string(), e))?;
            StreetMap::read(f)?
        }
        None => StreetMap::read(io::stdin())?,
    };
    Ok(map)
}

pub fn driver() -> Result<(), Error> {
    let matches = app().get_matches();
    let config = Config::from_matches(&matches)?;
    init_tracing(config.verbosity)?;

    let map = read_map(config.map.as_deref())?;
    info!(locations = map.len(), roads = map.roads().len(), "read map");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &map, &mut out)
}

/// Run every requested strategy and report on each.
///
/// Fails when none of them found a path.
pub fn run<W: Write>(config: &Config, map: &StreetMap, out: &mut W) -> Result<(), Error> {
    if config.show_bounds {
        if let Some(bounds) = map.bounds() {
            writeln!(
                out,
                "Bounds: west {} east {} south {} north {}",
                bounds.west(),
                bounds.east(),
                bounds.south(),
                bounds.north()
            )?;
        }
    }

    let mut found = false;
    for strategy in &config.strategies {
        info!(%strategy, start = %config.start, goal = %config.goal, "searching");
        let outcome = strategy.run(map, &config.start, &config.goal, &config.options)?;
        report(out, *strategy, &outcome, &config.options)?;
        found |= outcome.is_success();
    }

    if !found {
        return Err(RoadtripError::NoPath(config.start.clone(), config.goal.clone()).into());
    }
    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    strategy: Strategy,
    outcome: &SearchOutcome<Location>,
    options: &SearchOptions,
) -> io::Result<()> {
    writeln!(out, "{} search:", strategy)?;
    match outcome.path() {
        Some(path) => {
            let names: Vec<_> = path.iter().map(|l| l.name()).collect();
            writeln!(out, "  path: {}", names.join(" -> "))?;
            writeln!(out, "  cost: {}", outcome.path_cost().unwrap_or_default())?;
        }
        None => {
            let reason = match outcome.termination() {
                Termination::LimitReached => {
                    format!("limit of {} expansions reached", options.expansion_limit)
                }
                _ => "every reachable location explored".to_string(),
            };
            writeln!(out, "  no path found ({})", reason)?;
        }
    }
    writeln!(out, "  expansions: {}", outcome.expansions())
}

#[cfg(test)]
mod test {
    use super::*;

    const MAP: &str = "
        location A 0.0 0.0
        location B 0.0 1.0
        location C 1.0 1.0
        location D 5.0 5.0

        road ab A B 2
        road ba B A 2
        road bc B C 1.5
        road ac A C 9
    ";

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["roadtrip"];
        argv.extend_from_slice(args);
        let matches = app().get_matches_from_safe(argv).unwrap();
        Config::from_matches(&matches).unwrap()
    }

    fn output(config: &Config) -> (String, Result<(), Error>) {
        let map: StreetMap = MAP.parse().unwrap();
        let mut out = Vec::new();
        let result = run(config, &map, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn defaults() {
        let c = config(&["map.txt", "A", "C"]);
        assert_eq!(c.map.as_deref(), Some("map.txt"));
        assert_eq!(c.start, "A");
        assert_eq!(c.goal, "C");
        assert_eq!(c.strategies, vec![Strategy::AStar]);
        assert_eq!(c.options.expansion_limit, 10_000);
        assert!(c.options.repeated_state_checking);
        assert!(!c.show_bounds);
        assert_eq!(c.verbosity, 0);
    }

    #[test]
    fn arguments() {
        let c = config(&[
            "-",
            "A",
            "C",
            "-s",
            "bfs",
            "--strategy",
            "DFS",
            "-l",
            "5",
            "--no-repeated-state-checking",
            "--bounds",
            "-vv",
        ]);
        assert_eq!(c.map, None);
        assert_eq!(c.strategies, vec![Strategy::BreadthFirst, Strategy::DepthFirst]);
        assert_eq!(c.options.expansion_limit, 5);
        assert!(!c.options.repeated_state_checking);
        assert!(c.show_bounds);
        assert_eq!(c.verbosity, 2);
    }

    #[test]
    fn unknown_strategy() {
        let matches = app()
            .get_matches_from_safe(vec!["roadtrip", "map", "A", "B", "-s", "greedy"])
            .unwrap();
        let err = Config::from_matches(&matches).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoadtripError>(),
            Some(RoadtripError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn reports_each_strategy() {
        let (text, result) = output(&config(&[
            "-", "A", "C", "-s", "bfs", "-s", "ucs", "-s", "astar", "--bounds",
        ]));
        result.unwrap();

        assert!(text.starts_with("Bounds: west 0 east 5 south 0 north 5\n"));
        assert!(text.contains("Breadth-first search:\n  path: A -> C\n  cost: 9\n"));
        assert!(text.contains("Uniform cost search:\n  path: A -> B -> C\n  cost: 3.5\n"));
        assert!(text.contains("A* search:\n  path: A -> B -> C\n  cost: 3.5\n"));
    }

    #[test]
    fn no_path() {
        let (text, result) = output(&config(&["-", "A", "D", "-s", "bfs"]));
        assert!(text.contains("no path found (every reachable location explored)"));
        assert!(matches!(
            result.unwrap_err().downcast_ref::<RoadtripError>(),
            Some(RoadtripError::NoPath(_, _))
        ));

        let (text, result) = output(&config(&["-", "A", "C", "-s", "dfs", "-l", "0"]));
        assert!(text.contains("no path found (limit of 0 expansions reached)"));
        assert!(text.contains("expansions: 0"));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_location() {
        let (_, result) = output(&config(&["-", "A", "Nowhere"]));
        assert!(matches!(
            result.unwrap_err().downcast_ref::<searcher::SearchError>(),
            Some(searcher::SearchError::UnknownLocation(name)) if name == "Nowhere"
        ));
    }

    #[test]
    fn strategies_table() {
        assert_eq!(STRATEGIES.len(), 4);
        assert_eq!(STRATEGIES["ucs"].discipline(), Discipline::Priority);
        assert_eq!(STRATEGIES["dfs"].discipline(), Discipline::Lifo);
    }
}

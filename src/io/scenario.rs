//! Line-based scenario files describing route connect/disconnect sequences
//!
//! ```text
//! # 3x3 grid with one bent route
//! grid 3 3
//! building 0 0
//! connect a 0,0 1,0 1,1 1,2
//! disconnect a
//! ```
//!
//! `grid W H` must come first. Other commands: `building X Y`, `clear X Y`,
//! `connect NAME X,Y X,Y ...`, `disconnect NAME` and `resize W H`. Blank lines
//! and text after `#` are ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::io::error::{PathError, Result, WithContext};
use crate::routing::network::PathNetwork;
use crate::routing::route::{Route, RouteId};
use crate::spatial::coordinate::Coordinate;

/// One scenario instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the grid
    Grid {
        /// Columns
        width: i32,
        /// Rows
        height: i32,
    },
    /// Replace the grid, dropping every route
    Resize {
        /// Columns
        width: i32,
        /// Rows
        height: i32,
    },
    /// Place a building
    Building(Coordinate),
    /// Remove a building
    Clear(Coordinate),
    /// Connect a named route
    Connect {
        /// Route name, unique within the scenario
        name: String,
        /// Steps from source to destination
        steps: Vec<Coordinate>,
    },
    /// Disconnect a named route
    Disconnect {
        /// Route name
        name: String,
    },
}

/// A command and the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioLine {
    /// 1-based line number
    pub line: usize,
    /// Parsed instruction
    pub command: Command,
}

/// Parsed scenario file
#[derive(Debug, Clone)]
pub struct Scenario {
    path: PathBuf,
    lines: Vec<ScenarioLine>,
}

impl Scenario {
    /// Read and parse a scenario file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, or `ScenarioParse`
    /// for the first malformed line
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| PathError::FileSystem {
            path: path.to_path_buf(),
            operation: "read scenario",
            source: e,
        })?;
        Self::parse(path, &source)
    }

    /// Parse scenario text; `path` is only used in error messages
    ///
    /// # Errors
    ///
    /// Returns `ScenarioParse` for the first malformed line, or if the
    /// scenario does not start with `grid`
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let mut lines = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }

            let command =
                parse_command(text).map_err(|reason| PathError::ScenarioParse {
                    path: path.to_path_buf(),
                    line,
                    reason,
                })?;

            let is_grid = matches!(command, Command::Grid { .. });
            if is_grid != lines.is_empty() {
                return Err(PathError::ScenarioParse {
                    path: path.to_path_buf(),
                    line,
                    reason: "'grid' must be the first command and appear once".to_string(),
                });
            }

            lines.push(ScenarioLine { line, command });
        }

        if lines.is_empty() {
            return Err(PathError::ScenarioParse {
                path: path.to_path_buf(),
                line: 0,
                reason: "scenario contains no commands".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Source file of the scenario
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed commands in file order
    pub fn commands(&self) -> &[ScenarioLine] {
        &self.lines
    }

    /// Replay every command and return the final network
    ///
    /// # Errors
    ///
    /// Returns `ScenarioStep` wrapping the first command that fails
    pub fn run(&self) -> Result<PathNetwork> {
        self.run_with(|_, _| {})
    }

    /// Replay every command, calling `observer` after each one is applied
    ///
    /// # Errors
    ///
    /// Returns `ScenarioStep` wrapping the first command that fails
    pub fn run_with<F>(&self, mut observer: F) -> Result<PathNetwork>
    where
        F: FnMut(&PathNetwork, &ScenarioLine),
    {
        let mut entries = self.lines.iter();
        let not_grid = || PathError::ScenarioParse {
            path: self.path.clone(),
            line: 0,
            reason: "scenario does not start with 'grid'".to_string(),
        };
        let first = entries.next().ok_or_else(not_grid)?;
        let Command::Grid { width, height } = &first.command else {
            return Err(not_grid());
        };

        let mut network = PathNetwork::new(*width, *height).at_line(&self.path, first.line)?;
        observer(&network, first);

        let mut registry = RouteRegistry::default();
        for entry in entries {
            registry
                .apply(&mut network, &entry.command)
                .at_line(&self.path, entry.line)?;
            observer(&network, entry);
        }

        Ok(network)
    }
}

// Maps scenario route names to stable identities
#[derive(Debug, Default)]
struct RouteRegistry {
    ids: HashMap<String, RouteId>,
}

impl RouteRegistry {
    fn id_for(&mut self, name: &str) -> RouteId {
        let next = RouteId(self.ids.len() as u64);
        *self.ids.entry(name.to_string()).or_insert(next)
    }

    fn apply(&mut self, network: &mut PathNetwork, command: &Command) -> Result<()> {
        match command {
            Command::Grid { width, height } | Command::Resize { width, height } => {
                network.resize(*width, *height)
            }
            Command::Building(cell) => network.place_building(*cell),
            Command::Clear(cell) => network.clear_building(*cell),
            Command::Connect { name, steps } => {
                let route = Route::new(self.id_for(name), steps.clone());
                network.connect(&route)
            }
            Command::Disconnect { name } => {
                let id = self.id_for(name);
                network.disconnect(id)
            }
        }
    }
}

fn parse_command(text: &str) -> std::result::Result<Command, String> {
    let mut tokens = text.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();
    let arguments: Vec<&str> = tokens.collect();

    match (keyword, arguments.as_slice()) {
        ("grid", [width, height]) => Ok(Command::Grid {
            width: parse_number(width)?,
            height: parse_number(height)?,
        }),
        ("resize", [width, height]) => Ok(Command::Resize {
            width: parse_number(width)?,
            height: parse_number(height)?,
        }),
        ("building", [x, y]) => Ok(Command::Building(Coordinate::new(
            parse_number(x)?,
            parse_number(y)?,
        ))),
        ("clear", [x, y]) => Ok(Command::Clear(Coordinate::new(
            parse_number(x)?,
            parse_number(y)?,
        ))),
        ("connect", [name, steps @ ..]) => Ok(Command::Connect {
            name: (*name).to_string(),
            steps: steps
                .iter()
                .map(|step| parse_coordinate(step))
                .collect::<std::result::Result<_, _>>()?,
        }),
        ("disconnect", [name]) => Ok(Command::Disconnect {
            name: (*name).to_string(),
        }),
        ("grid" | "resize" | "building" | "clear" | "connect" | "disconnect", _) => Err(format!(
            "wrong number of arguments for '{keyword}'"
        )),
        _ => Err(format!("unknown command '{keyword}'")),
    }
}

fn parse_number(token: &str) -> std::result::Result<i32, String> {
    token
        .parse()
        .map_err(|e| format!("expected an integer, got '{token}': {e}"))
}

fn parse_coordinate(token: &str) -> std::result::Result<Coordinate, String> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{token}'"))?;
    Ok(Coordinate::new(parse_number(x.trim())?, parse_number(y.trim())?))
}

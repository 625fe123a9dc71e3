//! Data structures for the organizer: teams, groups, matches, bracket, project.

mod game;
mod group;
mod knockout;
mod project;
mod settings;
mod team;

pub use game::{GameMatch, MatchId, MatchLink, Side};
pub use group::{Group, GroupId};
pub use knockout::{KnockoutMatch, Provenance, Round};
pub use project::{Project, ProjectError, ProjectId, TeamLocation};
pub use settings::{PointsScheme, TournamentSettings};
pub use team::{Glyph, Team, TeamId, TeamKind, DEFAULT_FLAG};

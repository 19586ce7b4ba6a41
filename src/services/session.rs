//! Selection state for one client and the write-then-mirror protocol.
//!
//! A session starts empty. Selection only changes through the cascade:
//! choosing a ground re-lists its months and selects the first, choosing a
//! month re-lists its players. Every fetch of a cascade completes before any
//! of it is committed, so a failed fetch leaves the previous view intact and
//! no lower-level list outlives a change above it.
//!
//! Mutations write to the store first and mirror into the view only once the
//! write has succeeded.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::roster_service::RosterService;
use crate::errors::{AppError, Result};
use crate::models::{Ground, Player, PlayerField};

/// What a client renders: the lists at each level and the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterView {
    pub grounds: Vec<Ground>,
    pub current_ground: Option<String>,
    pub months: Vec<String>,
    pub current_month: Option<String>,
    pub players: Vec<Player>,
}

/// Confirmation shown after a write has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    GroundAdded,
    MonthAdded,
    PlayerAdded,
    PlayerDeleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::GroundAdded => "Ground added",
            Notice::MonthAdded => "Month added",
            Notice::PlayerAdded => "Player added",
            Notice::PlayerDeleted => "Player deleted",
        }
    }
}

impl Serialize for Notice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Months and players derived from one ground selection.
struct MonthCascade {
    months: Vec<String>,
    current_month: Option<String>,
    players: Vec<Player>,
}

pub struct RosterSession {
    roster: RosterService,
    view: RosterView,
}

impl RosterSession {
    pub fn new(roster: RosterService) -> Self {
        RosterSession {
            roster,
            view: RosterView::default(),
        }
    }

    pub fn view(&self) -> &RosterView {
        &self.view
    }

    /// Lists grounds and runs the cascade from the first one, if any.
    pub async fn load(&mut self) -> Result<()> {
        let grounds = self.roster.list_grounds().await?;
        let current_ground = grounds.first().map(|g| g.id.clone());
        let cascade = match &current_ground {
            Some(ground_id) => self.month_cascade(ground_id).await?,
            None => MonthCascade::empty(),
        };

        self.view.grounds = grounds;
        self.commit_ground(current_ground, cascade);
        Ok(())
    }

    pub async fn select_ground(&mut self, ground_id: &str) -> Result<()> {
        if !self.view.grounds.iter().any(|g| g.id == ground_id) {
            return Err(AppError::not_found(format!("grounds/{}", ground_id)));
        }

        let cascade = self.month_cascade(ground_id).await?;
        self.commit_ground(Some(ground_id.to_string()), cascade);
        Ok(())
    }

    pub async fn select_month(&mut self, label: &str) -> Result<()> {
        let ground_id = self.current_ground()?.to_string();
        if !self.view.months.iter().any(|m| m == label) {
            return Err(AppError::not_found(format!(
                "grounds/{}/months/{}",
                ground_id, label
            )));
        }

        let players = self.roster.list_players(&ground_id, label).await?;
        self.view.current_month = Some(label.to_string());
        self.view.players = players;
        Ok(())
    }

    /// Blank names are ignored: no write, no notice.
    pub async fn add_ground(&mut self, name: &str) -> Result<Option<Notice>> {
        let Some(ground) = self.roster.create_ground(name).await? else {
            return Ok(None);
        };

        // A freshly keyed ground has no months yet, so nothing is re-listed.
        let ground_id = ground.id.clone();
        self.view.grounds.push(ground);
        self.commit_ground(Some(ground_id), MonthCascade::empty());
        Ok(Some(Notice::GroundAdded))
    }

    /// Blank labels are ignored. Re-adding a listed label selects it without
    /// duplicating the entry.
    pub async fn add_month(&mut self, label: &str) -> Result<Option<Notice>> {
        let ground_id = self.current_ground()?.to_string();
        let Some(month) = self.roster.create_month(&ground_id, label).await? else {
            return Ok(None);
        };

        // An existing label may already hold players.
        let label = month.id;
        let players = self.roster.list_players(&ground_id, &label).await?;

        if !self.view.months.contains(&label) {
            self.view.months.push(label.clone());
        }
        self.view.current_month = Some(label);
        self.view.players = players;
        Ok(Some(Notice::MonthAdded))
    }

    pub async fn add_player(&mut self) -> Result<Notice> {
        let (ground_id, label) = self.current_month()?;
        let player = self.roster.create_player(&ground_id, &label).await?;
        self.view.players.push(player);
        Ok(Notice::PlayerAdded)
    }

    /// Writes one field, then mirrors that same field locally.
    pub async fn update_player(
        &mut self,
        player_id: &str,
        field: PlayerField,
        raw: &Value,
    ) -> Result<()> {
        let value = field.coerce(raw)?;
        let (ground_id, label) = self.current_month()?;

        self.roster
            .update_player_field(&ground_id, &label, player_id, &value)
            .await?;

        for player in self.view.players.iter_mut().filter(|p| p.id == player_id) {
            player.apply(&value);
        }
        Ok(())
    }

    pub async fn delete_player(&mut self, player_id: &str) -> Result<Notice> {
        let (ground_id, label) = self.current_month()?;
        self.roster.delete_player(&ground_id, &label, player_id).await?;
        self.view.players.retain(|p| p.id != player_id);
        Ok(Notice::PlayerDeleted)
    }

    async fn month_cascade(&self, ground_id: &str) -> Result<MonthCascade> {
        let months = self.roster.list_months(ground_id).await?;
        let current_month = months.first().cloned();
        let players = match &current_month {
            Some(label) => self.roster.list_players(ground_id, label).await?,
            None => Vec::new(),
        };

        Ok(MonthCascade {
            months,
            current_month,
            players,
        })
    }

    fn commit_ground(&mut self, ground_id: Option<String>, cascade: MonthCascade) {
        self.view.current_ground = ground_id;
        self.view.months = cascade.months;
        self.view.current_month = cascade.current_month;
        self.view.players = cascade.players;
    }

    fn current_ground(&self) -> Result<&str> {
        self.view
            .current_ground
            .as_deref()
            .ok_or(AppError::NoGroundSelected)
    }

    fn current_month(&self) -> Result<(String, String)> {
        let ground_id = self.current_ground()?.to_string();
        let label = self
            .view
            .current_month
            .clone()
            .ok_or(AppError::NoMonthSelected)?;
        Ok((ground_id, label))
    }
}

impl MonthCascade {
    fn empty() -> Self {
        MonthCascade {
            months: Vec::new(),
            current_month: None,
            players: Vec::new(),
        }
    }
}

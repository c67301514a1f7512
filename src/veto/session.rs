//! # Veto Session
//!
//! Drives one full map vote: both captains pick four categories, one
//! category is drawn at random from the overlap, and (for categories with
//! three or more maps) three candidates are sampled and banned down to the
//! final map. Prompting is abstracted behind [`CaptainPrompts`] so the state
//! machine runs the same against Discord or a scripted test double.

use async_trait::async_trait;
use log::{debug, info};
use rand::seq::IndexedRandom;
use serenity::model::id::UserId;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::core::catalog::{CatalogError, MapCatalog};
use crate::veto::guard::SessionGuard;

/// Number of categories each captain must pick.
pub const CATEGORY_PICKS: usize = 4;

/// Number of candidate maps sampled for the ban phase.
const BAN_CANDIDATES: usize = 3;

/// Session-level failures. The command gateway turns these into channel
/// messages; nothing here crashes the process.
#[derive(Debug, Error)]
pub enum VetoError {
    #[error("a map vote is already in progress")]
    SessionAlreadyActive,
    #[error("the captains' category picks have no category in common")]
    NoOverlappingCategory,
    #[error("no response arrived before the prompt timed out")]
    PromptTimeout,
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Channel(#[from] anyhow::Error),
}

/// States of one veto run, in order of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VetoState {
    Idle,
    CollectingCategoriesA,
    CollectingCategoriesB,
    CategorySelected,
    Banning1,
    Banning2,
    Resolved,
    Errored,
}

/// Awaitable captain-facing prompts with typed results.
///
/// Implementations suspend until the authorized captain responds and post
/// their own completion feedback ("User X selected …", "X banned the map …").
#[async_trait]
pub trait CaptainPrompts: Send + Sync {
    /// Post plain text to the shared channel.
    async fn announce(&self, text: &str) -> Result<(), VetoError>;

    /// Ask a captain to pick exactly four categories; returns the raw picks.
    async fn select_categories(&self, captain: UserId) -> Result<Vec<String>, VetoError>;

    /// Ask a captain to ban one of the candidate maps; returns the pick.
    async fn ban_one(&self, captain: UserId, candidates: &[String]) -> Result<String, VetoError>;
}

/// One map-vote run between two captains.
///
/// Transient: construct, `run`, and discard. All mutation happens inside the
/// session's own sequential steps.
#[derive(Debug)]
pub struct VetoSession {
    captain1: UserId,
    captain2: UserId,
    state: VetoState,
    categories_a: BTreeSet<String>,
    categories_b: BTreeSet<String>,
    selected_category: Option<String>,
    candidate_maps: Vec<String>,
    result: Option<String>,
}

impl VetoSession {
    pub fn new(captain1: UserId, captain2: UserId) -> Self {
        VetoSession {
            captain1,
            captain2,
            state: VetoState::Idle,
            categories_a: BTreeSet::new(),
            categories_b: BTreeSet::new(),
            selected_category: None,
            candidate_maps: Vec::new(),
            result: None,
        }
    }

    pub fn state(&self) -> VetoState {
        self.state
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Run the vote to completion.
    ///
    /// Fails fast with [`VetoError::SessionAlreadyActive`] (leaving the
    /// session Idle) when another session holds the guard. The permit is
    /// released on every exit path, success or error.
    pub async fn run(
        &mut self,
        guard: &SessionGuard,
        catalog: &MapCatalog,
        prompts: &dyn CaptainPrompts,
    ) -> Result<String, VetoError> {
        let Some(_permit) = guard.acquire() else {
            return Err(VetoError::SessionAlreadyActive);
        };

        info!(
            "Starting map vote: captain1={} captain2={}",
            self.captain1, self.captain2
        );
        match self.drive(catalog, prompts).await {
            Ok(map) => {
                self.state = VetoState::Resolved;
                self.result = Some(map.clone());
                info!("Map vote completed: {map}");
                Ok(map)
            }
            Err(err) => {
                self.state = VetoState::Errored;
                Err(err)
            }
        }
    }

    async fn drive(
        &mut self,
        catalog: &MapCatalog,
        prompts: &dyn CaptainPrompts,
    ) -> Result<String, VetoError> {
        self.state = VetoState::CollectingCategoriesA;
        let picks = prompts.select_categories(self.captain1).await?;
        self.categories_a = validated_picks(picks, catalog)?;
        debug!("Captain 1 categories: {:?}", self.categories_a);

        self.state = VetoState::CollectingCategoriesB;
        let picks = prompts.select_categories(self.captain2).await?;
        self.categories_b = validated_picks(picks, catalog)?;
        debug!("Captain 2 categories: {:?}", self.categories_b);

        // Overlap in catalog order so logs and draws are reproducible to read.
        let overlap: Vec<String> = catalog
            .category_names()
            .filter(|name| self.categories_a.contains(*name) && self.categories_b.contains(*name))
            .map(str::to_string)
            .collect();
        debug!("Overlapping categories: {overlap:?}");
        let selected = draw_one(&overlap).ok_or(VetoError::NoOverlappingCategory)?;

        self.state = VetoState::CategorySelected;
        self.selected_category = Some(selected.clone());
        info!("Selected category: {selected}");
        prompts
            .announce(&format!("The map category will be ``{selected}``!"))
            .await?;

        let maps = catalog.maps_for(&selected)?;
        let final_map = match maps.len() {
            1 => {
                prompts
                    .announce("Skipping map bans as there is only 1 map.")
                    .await?;
                maps[0].clone()
            }
            2 => {
                prompts
                    .announce(
                        "Skipping map bans and selecting a map at random as there are only 2 maps.",
                    )
                    .await?;
                draw_one(maps).ok_or(VetoError::NoOverlappingCategory)?
            }
            _ => {
                self.candidate_maps = sample_candidates(maps, BAN_CANDIDATES);
                debug!("Sampled maps for banning: {:?}", self.candidate_maps);

                self.state = VetoState::Banning1;
                let banned = prompts.ban_one(self.captain1, &self.candidate_maps).await?;
                self.remove_candidate(&banned)?;

                self.state = VetoState::Banning2;
                let banned = prompts.ban_one(self.captain2, &self.candidate_maps).await?;
                self.remove_candidate(&banned)?;

                self.candidate_maps
                    .first()
                    .cloned()
                    .ok_or_else(|| VetoError::InvalidSelection("no candidate map left".to_string()))?
            }
        };

        prompts
            .announce(&format!("The map will be: ``{final_map}``"))
            .await?;
        Ok(final_map)
    }

    /// Remove one banned map from the candidates. Each ban takes out exactly
    /// one still-standing candidate.
    fn remove_candidate(&mut self, banned: &str) -> Result<(), VetoError> {
        let position = self
            .candidate_maps
            .iter()
            .position(|m| m == banned)
            .ok_or_else(|| {
                VetoError::InvalidSelection(format!("'{banned}' is not a candidate map"))
            })?;
        self.candidate_maps.remove(position);
        Ok(())
    }
}

/// Check a captain's picks: exactly four distinct, all known categories.
fn validated_picks(
    picks: Vec<String>,
    catalog: &MapCatalog,
) -> Result<BTreeSet<String>, VetoError> {
    let set: BTreeSet<String> = picks.into_iter().collect();
    if set.len() != CATEGORY_PICKS {
        return Err(VetoError::InvalidSelection(format!(
            "expected exactly {CATEGORY_PICKS} distinct categories, got {}",
            set.len()
        )));
    }
    for name in &set {
        catalog.maps_for(name)?;
    }
    Ok(set)
}

/// Uniform draw of one element; None on an empty slice.
fn draw_one(items: &[String]) -> Option<String> {
    items.choose(&mut rand::rng()).cloned()
}

/// Sample `count` distinct elements uniformly, without replacement.
fn sample_candidates(items: &[String], count: usize) -> Vec<String> {
    items
        .choose_multiple(&mut rand::rng(), count)
        .cloned()
        .collect()
}

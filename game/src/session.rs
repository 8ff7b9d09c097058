use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

use map_model::StreetCatalog;

use crate::{generate_candidate, score_guess, Difficulty, GuessResult, IntersectionCandidate};

/// Old undo snapshots beyond this get dropped.
const MAX_UNDO_STATES: usize = 50;

/// One player's progress against one loaded area. Owns the catalog and all mutable game state;
/// discard and rebuild it when a different area loads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    catalog: StreetCatalog,
    difficulty: Difficulty,
    current: Option<IntersectionCandidate>,

    /// Lower-cased names of streets the player has found.
    found_streets: BTreeSet<String>,
    /// "name1|name2" keys of intersections the player has found.
    found_intersections: BTreeSet<String>,

    intersection_score: u32,
    /// Guess distance per completed intersection round, in order.
    accuracy_history: Vec<Distance>,

    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Snapshot {
    found_streets: BTreeSet<String>,
    found_intersections: BTreeSet<String>,
}

impl Session {
    pub fn new(catalog: StreetCatalog, difficulty: Difficulty) -> Session {
        Session {
            catalog,
            difficulty,
            current: None,
            found_streets: BTreeSet::new(),
            found_intersections: BTreeSet::new(),
            intersection_score: 0,
            accuracy_history: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &StreetCatalog {
        &self.catalog
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect on the next generation round; the current candidate isn't re-validated.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn current_candidate(&self) -> Option<&IntersectionCandidate> {
        self.current.as_ref()
    }

    /// Starts a new intersection round. None means no candidate could be found -- the player has
    /// exhausted the area at this difficulty, or the catalog is empty.
    pub fn next_round<R: Rng>(&mut self, rng: &mut R) -> Option<&IntersectionCandidate> {
        self.current =
            generate_candidate(&self.catalog, self.difficulty, &self.found_intersections, rng);
        self.current.as_ref()
    }

    /// Scores the player's click against the current candidate and finishes the round; the pair
    /// counts as found even on a bad guess. None if there's no round in progress.
    pub fn submit_guess(&mut self, guess: LonLat) -> Option<GuessResult> {
        let candidate = self.current.take()?;
        let result = score_guess(&candidate, guess);

        self.found_intersections.insert(candidate.pair_key());
        self.intersection_score += result.score;
        self.accuracy_history.push(result.dist);
        info!(
            "{} & {}: {} away, {} points",
            candidate.street1, candidate.street2, result.dist, result.score
        );
        Some(result)
    }

    /// Handles a round of free-text street input. Entries are comma-separated; each resolves
    /// through the catalog's matcher. Returns the names newly found per entry (an entry the
    /// player already found, or that matches nothing, contributes an empty list).
    pub fn enter_streets(&mut self, input: &str) -> Vec<Vec<String>> {
        let mut results = Vec::new();
        let mut newly_found: Vec<String> = Vec::new();

        for entry in input.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let mut found_here = Vec::new();
            for feature in self.catalog.resolve(entry) {
                if !self.found_streets.contains(&feature.name.to_lowercase()) {
                    found_here.push(feature.name.clone());
                }
            }
            newly_found.extend(found_here.clone());
            results.push(found_here);
        }

        if !newly_found.is_empty() {
            self.save_snapshot();
            for name in newly_found {
                self.found_streets.insert(name.to_lowercase());
            }
        }
        results
    }

    /// Marks every street named like "1st", "2nd", ... "Nth" over the inclusive range as found,
    /// resolving each generated name through the catalog's matcher. Returns the names newly
    /// found, in range order; one snapshot covers the whole batch, so a single undo reverts it.
    pub fn autofill_numbered(&mut self, from: u32, to: u32) -> Vec<String> {
        let mut newly_found = Vec::new();
        for i in from..=to {
            let name = format!("{}{}", i, ordinal_suffix(i));
            for feature in self.catalog.resolve(&name) {
                if !self.found_streets.contains(&feature.name.to_lowercase()) {
                    newly_found.push(feature.name.clone());
                }
            }
        }

        if !newly_found.is_empty() {
            self.save_snapshot();
            for name in &newly_found {
                self.found_streets.insert(name.to_lowercase());
            }
        }
        newly_found
    }

    /// Un-finds one street by name, case-insensitively. Snapshots first, so the removal is
    /// undoable. Returns false if the street wasn't found to begin with.
    pub fn remove_street(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        if !self.found_streets.contains(&key) {
            return false;
        }
        self.save_snapshot();
        self.found_streets.remove(&key);
        true
    }

    pub fn found_streets(&self) -> &BTreeSet<String> {
        &self.found_streets
    }

    pub fn found_intersections(&self) -> &BTreeSet<String> {
        &self.found_intersections
    }

    pub fn intersection_score(&self) -> u32 {
        self.intersection_score
    }

    pub fn accuracy_history(&self) -> &Vec<Distance> {
        &self.accuracy_history
    }

    /// Wipes all progress, keeping the catalog and difficulty.
    pub fn reset(&mut self) {
        self.current = None;
        self.found_streets.clear();
        self.found_intersections.clear();
        self.intersection_score = 0;
        self.accuracy_history.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn save_snapshot(&mut self) {
        self.undo_stack.push(Snapshot {
            found_streets: self.found_streets.clone(),
            found_intersections: self.found_intersections.clone(),
        });
        if self.undo_stack.len() > MAX_UNDO_STATES {
            self.undo_stack.remove(0);
        }
        // A new find invalidates the redo chain.
        self.redo_stack.clear();
    }

    /// Restores the found-sets to before the last new find. Returns false if there's nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        let snapshot = match self.undo_stack.pop() {
            Some(x) => x,
            None => {
                return false;
            }
        };
        self.redo_stack.push(Snapshot {
            found_streets: std::mem::replace(&mut self.found_streets, snapshot.found_streets),
            found_intersections: std::mem::replace(
                &mut self.found_intersections,
                snapshot.found_intersections,
            ),
        });
        true
    }

    pub fn redo(&mut self) -> bool {
        let snapshot = match self.redo_stack.pop() {
            Some(x) => x,
            None => {
                return false;
            }
        };
        self.undo_stack.push(Snapshot {
            found_streets: std::mem::replace(&mut self.found_streets, snapshot.found_streets),
            found_intersections: std::mem::replace(
                &mut self.found_intersections,
                snapshot.found_intersections,
            ),
        });
        true
    }
}

fn ordinal_suffix(i: u32) -> &'static str {
    let (j, k) = (i % 10, i % 100);
    if j == 1 && k != 11 {
        "st"
    } else if j == 2 && k != 12 {
        "nd"
    } else if j == 3 && k != 13 {
        "rd"
    } else {
        "th"
    }
}

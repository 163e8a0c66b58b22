//! Board (category) management.

use tracing::{error, info};

use crate::api::BoardApi;
use crate::board::Board;
use crate::{Result, StudylogError};

/// Result of a board mutation that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the change and local state follows it.
    Applied,
    /// The confirmation was declined; nothing was sent.
    Declined,
    /// The request failed; local state is unchanged.
    Failed,
}

/// Board list with add/rename/delete.
pub struct BoardManager<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    boards: Vec<Board>,
    editing: Option<i64>,
}

impl<'a, A: BoardApi + ?Sized> BoardManager<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            boards: Vec::new(),
            editing: None,
        }
    }

    /// Boards currently shown.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Board whose label is being edited.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Load all boards, skipping entries without an id.
    pub async fn load(&mut self) -> bool {
        match self.api.list_boards().await {
            Ok(boards) => {
                self.boards = boards.into_iter().filter(|b| b.id.is_some()).collect();
                true
            }
            Err(e) => {
                error!("Failed to load boards: {}", e);
                false
            }
        }
    }

    /// Create a board.
    pub async fn add(&mut self, name: &str) -> Result<MutationOutcome> {
        let name = validate_name(name)?;

        match self.api.create_board(name).await {
            Ok(board) => {
                info!("Board created: {}", board.category);
                if board.id.is_some() {
                    self.boards.push(board);
                }
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                error!("Failed to create board '{}': {}", name, e);
                Ok(MutationOutcome::Failed)
            }
        }
    }

    /// Enter edit mode for one board.
    pub fn start_edit(&mut self, id: i64) -> bool {
        if self.position(id).is_some() {
            self.editing = Some(id);
            true
        } else {
            false
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Rename a board.
    ///
    /// The local label follows the response's category, or the submitted
    /// name when the response leaves it empty.
    pub async fn save(&mut self, id: i64, name: &str) -> Result<MutationOutcome> {
        let name = validate_name(name)?;
        let index = self
            .position(id)
            .ok_or_else(|| StudylogError::NotFound(format!("board {id}")))?;

        match self.api.update_board(id, name).await {
            Ok(updated) => {
                let label = if updated.category.is_empty() {
                    name.to_string()
                } else {
                    updated.category
                };
                self.boards[index].category = label;
                self.editing = None;
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                error!("Failed to rename board {}: {}", id, e);
                Ok(MutationOutcome::Failed)
            }
        }
    }

    /// Delete a board after `confirm` accepts it.
    pub async fn delete<F>(&mut self, id: i64, confirm: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&Board) -> bool,
    {
        let index = self
            .position(id)
            .ok_or_else(|| StudylogError::NotFound(format!("board {id}")))?;

        if !confirm(&self.boards[index]) {
            return Ok(MutationOutcome::Declined);
        }

        match self.api.delete_board(id).await {
            Ok(()) => {
                let removed = self.boards.remove(index);
                info!("Board deleted: {}", removed.category);
                if self.editing == Some(id) {
                    self.editing = None;
                }
                Ok(MutationOutcome::Applied)
            }
            Err(e) => {
                error!("Failed to delete board {}: {}", id, e);
                Ok(MutationOutcome::Failed)
            }
        }
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.boards.iter().position(|b| b.id == Some(id))
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StudylogError::Validation("board name is empty".to_string()));
    }
    Ok(name)
}

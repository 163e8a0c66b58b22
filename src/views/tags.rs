//! Random board tags.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::error;

use crate::api::BoardApi;
use crate::board::Board;
use crate::route::Location;

/// Fetch boards and keep a random subset of at most `count`.
///
/// Boards without an id are skipped. A failed fetch yields no tags.
pub async fn random_tags<A, R>(api: &A, count: usize, rng: &mut R) -> Vec<Board>
where
    A: BoardApi + ?Sized,
    R: Rng + ?Sized,
{
    match api.list_boards().await {
        Ok(boards) => pick_tags(boards, count, rng),
        Err(e) => {
            error!("Failed to load board tags: {}", e);
            Vec::new()
        }
    }
}

/// Shuffle `boards` and keep the first `count`.
pub fn pick_tags<R: Rng + ?Sized>(mut boards: Vec<Board>, count: usize, rng: &mut R) -> Vec<Board> {
    boards.retain(|b| b.id.is_some());
    boards.shuffle(rng);
    boards.truncate(count);
    boards
}

/// Where selecting a tag navigates.
pub fn tag_location(board_id: i64) -> Location {
    Location::new("/board").with_query("boardId", board_id.to_string())
}

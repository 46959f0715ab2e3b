//! Turn lifecycle.

use super::{ActionReply, Game};

impl Game {
    /// Readies every ally: attack flags are restored and stamina refilled.
    pub fn start_turn(&mut self) {
        for ally in self.field.board.iter_mut() {
            ally.can_attack = true;
            ally.refill_stamina(&mut self.events);
        }
        self.revalidate_session();
        tracing::debug!(turn = self.turn, "turn started");
    }

    /// Ends the turn: advances the counter, readies the board, then fires
    /// the on-clear hook if the enemy zone is empty and it has not fired yet.
    pub fn end_turn(&mut self) -> ActionReply {
        self.turn += 1;
        tracing::info!(turn = self.turn, "turn ended");
        self.log.info(format!("Turn {} begins.", self.turn));
        self.start_turn();
        self.check_clear();
        ActionReply::ok(format!("Turn {}.", self.turn))
    }
}

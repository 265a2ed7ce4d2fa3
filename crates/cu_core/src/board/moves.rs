//! Applying and undoing camel moves.

use tracing::trace;

use super::{contract_violation, Board, Position, UndoableMove, NUM_MOVES_PER_LEG};
use crate::color::Color;
use crate::debug_flags::move_debug_enabled;
use crate::dice::DieRoll;

impl Board {
    /// Applies a roll within the current leg. This may end the leg and/or the
    /// game. The move is reversible with [`Board::undo_last`].
    pub fn apply(&mut self, roll: DieRoll) {
        if self.leg_moves_index >= NUM_MOVES_PER_LEG {
            contract_violation("apply: every move of the leg was already made");
            return;
        }
        let mut mover = roll.color;
        let direction: i32 = if mover.is_crazy() { -1 } else { 1 };
        if mover.is_crazy() {
            mover = self.active_crazy(mover);
        }
        let Some(src) = self.camels[mover.index()].position else {
            contract_violation("apply: moving camel is off the board");
            return;
        };
        let Some(top) = self.spaces[src.index()].stack_top else {
            contract_violation("apply: moving camel's space has no stack");
            return;
        };

        let mut dest = src.add(i32::from(roll.value) * direction);
        if self.has_cheer(dest) {
            dest = dest.add(direction);
        }
        // Wrapping around the track means the finish line was crossed.
        self.game_over = (src.value() - dest.value()) * direction > 0;
        let mut push_below_stack = false;
        if self.has_boo(dest) {
            // The game stays over even when this lands back behind the line.
            dest = dest.add(-direction);
            push_below_stack = true;
        }

        self.leg_moves[self.leg_moves_index] =
            Some(UndoableMove { stack_bottom: mover, stack_top: top, src });
        self.leg_moves_index += 1;
        self.move_stack(mover, top, dest, push_below_stack);
        self.compute_ranking();

        if move_debug_enabled() {
            tracing::debug!("{roll}: {mover}..{top} {src} -> {dest} (game over: {})", self.game_over);
        } else {
            trace!("{roll}: {mover}..{top} {src} -> {dest}");
        }
    }

    /// Reverts the most recent [`Board::apply`].
    pub fn undo_last(&mut self) {
        let Some(index) = self.leg_moves_index.checked_sub(1) else {
            contract_violation("undo_last: no move made in this leg");
            return;
        };
        let Some(mv) = self.leg_moves[index].take() else {
            contract_violation("undo_last: move was rolled before the board was built");
            return;
        };
        self.game_over = false;
        self.leg_moves_index = index;
        // Undoing always goes back on top of the source stack.
        self.move_stack(mv.stack_bottom, mv.stack_top, mv.src, false);
        self.compute_ranking();
    }

    /// Picks which crazy camel a grey roll moves: the one carrying the other,
    /// or the one carrying anything when the rolled one carries nothing.
    fn active_crazy(&self, rolled: Color) -> Color {
        let camel = &self.camels[rolled.index()];
        let Some(other) = camel.other_crazy else {
            return rolled;
        };
        let other_next = self.camels[other.index()].next;
        if camel.next == Some(other) || (camel.next.is_none() && other_next.is_some_and(|c| c != rolled)) {
            other
        } else {
            rolled
        }
    }

    /// Moves the run `bottom..=top` onto `dest`, on top of the stack there or
    /// below it. The run is always the top or the bottom part of its stack.
    fn move_stack(&mut self, bottom: Color, top: Color, dest: Position, push_below_stack: bool) {
        let Some(src) = self.camels[bottom.index()].position else {
            contract_violation("move_stack: run is off the board");
            return;
        };

        let source = &mut self.spaces[src.index()];
        if source.stack_top == Some(top) {
            let below = self.camels[bottom.index()].prev;
            source.stack_top = below;
            match below {
                None => source.stack_bottom = None,
                Some(b) => self.camels[b.index()].next = None,
            }
        } else {
            let above = self.camels[top.index()].next;
            source.stack_bottom = above;
            match above {
                None => source.stack_top = None,
                Some(a) => {
                    self.camels[a.index()].prev = None;
                    self.camels[top.index()].next = None;
                }
            }
        }

        let target = &mut self.spaces[dest.index()];
        let prev_bottom = target.stack_bottom;
        self.camels[bottom.index()].prev = None;
        if push_below_stack {
            target.stack_bottom = Some(bottom);
            self.camels[top.index()].next = prev_bottom;
            match prev_bottom {
                None => target.stack_top = Some(top),
                Some(b) => self.camels[b.index()].prev = Some(top),
            }
        } else {
            match (prev_bottom, target.stack_top) {
                (Some(_), Some(prev_top)) => {
                    self.camels[bottom.index()].prev = Some(prev_top);
                    self.camels[prev_top.index()].next = Some(bottom);
                }
                _ => target.stack_bottom = Some(bottom),
            }
            target.stack_top = Some(top);
        }

        let mut cur = Some(bottom);
        while let Some(c) = cur {
            self.camels[c.index()].position = Some(dest);
            cur = if c == top { None } else { self.camels[c.index()].next };
        }
    }
}

//! Scene loading, transitions and back-navigation.

use crate::env::{SceneError, SceneTransition};
use crate::state::{EntityId, Zone};

use super::{ActionError, ActionReply, Game, LoadedScene};

impl Game {
    /// Loads a scene template into fresh zones.
    ///
    /// With `keep_board` the template's ally list is ignored and the current
    /// roster is kept as-is. Enemies and resources are always rebuilt. A
    /// failed load leaves every zone untouched.
    pub fn load_scene(&mut self, path: &str, keep_board: bool) -> ActionReply {
        let result = self.try_load_scene(path, keep_board);
        self.reply("load_scene", result)
    }

    /// Returns to the parent scene, keeping the board.
    pub fn go_back(&mut self) -> ActionReply {
        let result = match self.scene.as_ref().map(|scene| scene.parent.clone()) {
            None => Err(ActionError::NoScene),
            Some(None) => Err(SceneError::NoParent.into()),
            Some(Some(parent)) => self.try_load_scene(&parent, true),
        };
        self.reply("go_back", result)
    }

    pub(super) fn try_load_scene(
        &mut self,
        path: &str,
        keep_board: bool,
    ) -> Result<String, ActionError> {
        let template = self.scenes.load(path)?;
        template
            .validate()
            .map_err(|reason| SceneError::Malformed {
                path: path.to_string(),
                reason,
            })?;

        // Build everything first; commit only once nothing can fail.
        let mut next_id = self.next_id;
        let mut allocate = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let enemies: Zone = template
            .enemies
            .iter()
            .map(|spec| spec.instantiate(allocate()))
            .collect();

        let keep_board = keep_board && self.scene.is_some();
        let board = if keep_board {
            None
        } else {
            let mut members = Vec::with_capacity(template.board.len());
            for (index, spec) in template.board.iter().enumerate() {
                let ally = spec
                    .instantiate(allocate(), index, &self.config)
                    .map_err(|reason| SceneError::Malformed {
                        path: path.to_string(),
                        reason: format!("board entry {index}: {reason}"),
                    })?;
                members.push(ally);
            }
            Some(members.into_iter().collect::<Zone>())
        };

        self.next_id = next_id;
        self.field.enemies = enemies;
        if let Some(board) = board {
            self.field.board = board;
        }
        self.field.resources = template.resources.clone();
        self.scene = Some(LoadedScene {
            path: path.to_string(),
            title: template.title.clone(),
            on_clear: template.on_clear.clone(),
            parent: template.parent.clone(),
            cleared: false,
        });

        if let Some(mut session) = self.session.take() {
            // The zones it pointed into are gone.
            let _ = session.cancel();
        }

        let title = template.title.as_deref().unwrap_or(path);
        tracing::info!(
            scene = path,
            keep_board,
            enemies = self.field.enemies.len(),
            board = self.field.board.len(),
            "scene loaded"
        );
        let message = format!("Entered {title}.");
        self.log.info(message.clone());
        Ok(message)
    }

    /// Loads the destination of a transition. Failures are logged, not raised:
    /// the action that triggered the transition has already happened.
    pub(super) fn apply_transition(&mut self, transition: &SceneTransition) {
        self.transitions += 1;
        tracing::info!(
            to = %transition.to,
            preserve_board = transition.preserve_board,
            "scene transition"
        );
        if let Err(err) = self.try_load_scene(&transition.to, transition.preserve_board) {
            tracing::warn!(to = %transition.to, error = %err, "scene transition failed");
            self.log
                .error(format!("Could not travel to {}: {err}", transition.to));
            // Death hooks leave the fallen in place for the scene swap.
            self.field.enemies.remove_dead();
            self.field.board.remove_dead();
        }
    }

    /// Fires the on-clear hook once the enemy zone has no one left standing.
    ///
    /// Latched per loaded scene: the hook fires at most once.
    pub(super) fn check_clear(&mut self) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        if scene.cleared || self.field.enemies.iter().any(|e| e.is_alive()) {
            return false;
        }
        let Some(transition) = scene.on_clear.as_ref().map(|hook| hook.transition()) else {
            return false;
        };
        scene.cleared = true;
        self.log.info("The area is clear.");
        self.apply_transition(&transition);
        true
    }
}

//! The traversal loop.
//!
//! The engine holds the current scene id and advances one [`Step`] at a
//! time: render the scene on arrival, then either finish, run a battle,
//! or read and validate a selection. Invalid selections are reported and
//! re-read without rendering the scene again.

use crate::config::GameConfig;
use crate::error::{StoryError, StoryResult};
use crate::graph::SceneGraph;
use crate::ports::{BattleOutcome, EncounterHook, InputReader, Renderer};
use crate::scene::{SceneId, Trigger};

/// The result of one engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A choice or battle moved the story on.
    Moved {
        /// The scene left.
        from: SceneId,
        /// The scene entered.
        to: SceneId,
    },
    /// The selection was rejected; the engine stays put.
    Invalid {
        /// What the player typed.
        input: String,
    },
    /// A terminal scene was reached.
    Finished(SceneId),
    /// Input ran out before the story ended.
    InputClosed(SceneId),
}

/// How a full run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The story reached a terminal scene.
    Finished(SceneId),
    /// Input ran out at this scene.
    InputClosed(SceneId),
}

/// Parse a 1-based menu selection into a choice index.
///
/// Anything that is not a number in `1..=choices` is an
/// [`StoryError::InvalidSelection`].
pub fn parse_selection(input: &str, choices: usize) -> StoryResult<usize> {
    let trimmed = input.trim();
    let invalid = || StoryError::InvalidSelection {
        input: trimmed.to_string(),
        choices,
    };
    let number: usize = trimmed.parse().map_err(|_| invalid())?;
    if (1..=choices).contains(&number) {
        Ok(number - 1)
    } else {
        Err(invalid())
    }
}

/// Walks a [`SceneGraph`].
#[derive(Debug)]
pub struct NarrativeEngine<'g> {
    graph: &'g SceneGraph,
    config: GameConfig,
    current: SceneId,
    rendered: bool,
    invalid_streak: u32,
    history: Vec<SceneId>,
}

impl<'g> NarrativeEngine<'g> {
    /// Start at the configured entry scene.
    pub fn new(graph: &'g SceneGraph, config: GameConfig) -> Self {
        let current = config.entry;
        Self {
            graph,
            config,
            current,
            rendered: false,
            invalid_streak: 0,
            history: vec![current],
        }
    }

    /// The scene the engine is on.
    pub fn current(&self) -> SceneId {
        self.current
    }

    /// Every scene entered so far, the entry included.
    pub fn history(&self) -> &[SceneId] {
        &self.history
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance by one step.
    pub fn step(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputReader,
        hook: &mut dyn EncounterHook,
    ) -> StoryResult<Step> {
        let graph = self.graph;
        let scene = graph
            .get(self.current)
            .ok_or_else(|| StoryError::BrokenGraph {
                from: self.previous(),
                target: self.current,
            })?;

        if !self.rendered {
            renderer.render_scene(scene);
            self.rendered = true;
        }

        if scene.is_terminal() {
            renderer.report_finished(scene);
            tracing::debug!(scene = %scene.id, "story finished");
            return Ok(Step::Finished(scene.id));
        }

        if let Some(Trigger::Battle {
            encounter,
            victory,
            defeat,
        }) = &scene.trigger
        {
            let outcome = hook.run_battle(encounter, input)?;
            tracing::info!(%encounter, ?outcome, "battle resolved");
            let next = match outcome {
                BattleOutcome::Victory => *victory,
                BattleOutcome::Defeat => *defeat,
            };
            return self.transition(next);
        }

        let Some(line) = input.next_line()? else {
            tracing::debug!(scene = %scene.id, "input closed");
            return Ok(Step::InputClosed(scene.id));
        };

        match parse_selection(&line, scene.choices.len()) {
            Ok(index) => self.transition(scene.choices[index].target),
            Err(e) => {
                self.invalid_streak += 1;
                tracing::warn!(scene = %scene.id, error = %e, "invalid selection");
                renderer.report_invalid(line.trim(), scene.choices.len());
                let limit = self.config.max_invalid_attempts;
                if limit > 0 && self.invalid_streak >= limit {
                    return Err(StoryError::TooManyInvalid(self.invalid_streak));
                }
                Ok(Step::Invalid {
                    input: line.trim().to_string(),
                })
            }
        }
    }

    /// Step until the story finishes or input runs out.
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputReader,
        hook: &mut dyn EncounterHook,
    ) -> StoryResult<Ending> {
        loop {
            match self.step(renderer, input, hook)? {
                Step::Finished(id) => return Ok(Ending::Finished(id)),
                Step::InputClosed(id) => return Ok(Ending::InputClosed(id)),
                Step::Moved { .. } | Step::Invalid { .. } => {}
            }
        }
    }

    fn transition(&mut self, to: SceneId) -> StoryResult<Step> {
        let from = self.current;
        if !self.graph.contains(to) {
            return Err(StoryError::BrokenGraph {
                from: Some(from),
                target: to,
            });
        }
        tracing::debug!(%from, %to, "transition");
        self.current = to;
        self.rendered = false;
        self.invalid_streak = 0;
        self.history.push(to);
        Ok(Step::Moved { from, to })
    }

    fn previous(&self) -> Option<SceneId> {
        self.history.iter().rev().nth(1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ScriptedInput;
    use crate::scene::Scene;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<SceneId>,
        invalid: Vec<String>,
        finished: Option<SceneId>,
    }

    impl Renderer for Recorder {
        fn render_scene(&mut self, scene: &Scene) {
            self.rendered.push(scene.id);
        }

        fn report_invalid(&mut self, input: &str, _choices: usize) {
            self.invalid.push(input.to_string());
        }

        fn report_finished(&mut self, scene: &Scene) {
            self.finished = Some(scene.id);
        }
    }

    /// Wins or loses every battle, and counts them.
    struct FixedHook {
        outcome: BattleOutcome,
        fought: Vec<String>,
    }

    impl FixedHook {
        fn new(outcome: BattleOutcome) -> Self {
            Self {
                outcome,
                fought: Vec::new(),
            }
        }
    }

    impl EncounterHook for FixedHook {
        fn run_battle(
            &mut self,
            encounter: &str,
            _input: &mut dyn InputReader,
        ) -> StoryResult<BattleOutcome> {
            self.fought.push(encounter.to_string());
            Ok(self.outcome)
        }
    }

    fn fork() -> SceneGraph {
        let mut graph = SceneGraph::new();
        graph
            .add_scene(
                Scene::new(SceneId(1), "A fork.")
                    .with_choice("mountain", SceneId(2))
                    .with_choice("castle", SceneId(3)),
            )
            .unwrap();
        graph.add_scene(Scene::new(SceneId(2), "Summit.")).unwrap();
        graph
            .add_scene(Scene::new(SceneId(3), "Gate.").with_choice("back", SceneId(1)))
            .unwrap();
        graph
    }

    type Played = (StoryResult<Ending>, Recorder, Vec<SceneId>);

    fn play(graph: &SceneGraph, lines: &[&str]) -> Played {
        let mut engine = NarrativeEngine::new(graph, GameConfig::default());
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::new(lines.iter().copied());
        let mut hook = FixedHook::new(BattleOutcome::Victory);
        let result = engine.run(&mut renderer, &mut input, &mut hook);
        (result, renderer, engine.history().to_vec())
    }

    #[test]
    fn select_first_choice_and_finish() {
        let (result, renderer, history) = play(&fork(), &["1"]);
        assert_eq!(result.unwrap(), Ending::Finished(SceneId(2)));
        assert_eq!(renderer.rendered, [SceneId(1), SceneId(2)]);
        assert_eq!(renderer.finished, Some(SceneId(2)));
        assert_eq!(history, [SceneId(1), SceneId(2)]);
    }

    #[test]
    fn invalid_selection_reprompts_once() {
        let graph = fork();
        let mut engine = NarrativeEngine::new(&graph, GameConfig::default());
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::new(["5", "1"]);
        let mut hook = FixedHook::new(BattleOutcome::Victory);

        let step = engine.step(&mut renderer, &mut input, &mut hook).unwrap();
        assert_eq!(
            step,
            Step::Invalid {
                input: "5".to_string()
            }
        );
        assert_eq!(engine.current(), SceneId(1));
        assert_eq!(renderer.invalid, ["5"]);

        let step = engine.step(&mut renderer, &mut input, &mut hook).unwrap();
        assert_eq!(
            step,
            Step::Moved {
                from: SceneId(1),
                to: SceneId(2)
            }
        );
        // Scene 1 was rendered once despite the re-prompt.
        assert_eq!(renderer.rendered, [SceneId(1)]);
        assert_eq!(input.reads(), 2);
    }

    #[test]
    fn non_numeric_and_zero_are_invalid() {
        let (result, renderer, _) = play(&fork(), &["abc", "0", "", " 2 "]);
        assert_eq!(result.unwrap(), Ending::InputClosed(SceneId(3)));
        assert_eq!(renderer.invalid, ["abc", "0", ""]);
        assert_eq!(renderer.rendered, [SceneId(1), SceneId(3)]);
    }

    #[test]
    fn terminal_scene_reads_no_input() {
        let mut graph = SceneGraph::new();
        graph.add_scene(Scene::new(SceneId(1), "The end.")).unwrap();
        let mut engine = NarrativeEngine::new(&graph, GameConfig::default());
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::new(["1"]);
        let mut hook = FixedHook::new(BattleOutcome::Victory);

        let ending = engine.run(&mut renderer, &mut input, &mut hook).unwrap();
        assert_eq!(ending, Ending::Finished(SceneId(1)));
        assert_eq!(input.reads(), 0);
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let (result, renderer, _) = play(&fork(), &[]);
        assert_eq!(result.unwrap(), Ending::InputClosed(SceneId(1)));
        assert!(renderer.finished.is_none());
    }

    #[test]
    fn missing_entry_is_broken_graph() {
        let graph = fork();
        let config = GameConfig::default().with_entry(SceneId(9));
        let mut engine = NarrativeEngine::new(&graph, config);
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::default();
        let mut hook = FixedHook::new(BattleOutcome::Victory);
        let err = engine.run(&mut renderer, &mut input, &mut hook);
        assert!(matches!(
            err,
            Err(StoryError::BrokenGraph {
                from: None,
                target: SceneId(9)
            })
        ));
        assert!(renderer.rendered.is_empty());
    }

    #[test]
    fn dangling_choice_is_broken_graph() {
        let mut graph = fork();
        graph.replace_scene(
            Scene::new(SceneId(2), "Cliff.").with_choice("jump", SceneId(40)),
        );
        let (result, _, _) = play(&graph, &["1", "1"]);
        assert!(matches!(
            result,
            Err(StoryError::BrokenGraph {
                from: Some(SceneId(2)),
                target: SceneId(40)
            })
        ));
    }

    #[test]
    fn battle_scene_branches_on_outcome() {
        let mut graph = SceneGraph::new();
        graph
            .add_scene(
                Scene::new(SceneId(1), "Ogres attack!")
                    .with_battle("ogre", SceneId(2), SceneId(3)),
            )
            .unwrap();
        graph.add_scene(Scene::new(SceneId(2), "Victory.")).unwrap();
        graph.add_scene(Scene::new(SceneId(3), "Game over.")).unwrap();

        for (outcome, expected) in [
            (BattleOutcome::Victory, SceneId(2)),
            (BattleOutcome::Defeat, SceneId(3)),
        ] {
            let mut engine = NarrativeEngine::new(&graph, GameConfig::default());
            let mut renderer = Recorder::default();
            let mut input = ScriptedInput::default();
            let mut hook = FixedHook::new(outcome);
            let ending = engine.run(&mut renderer, &mut input, &mut hook).unwrap();
            assert_eq!(ending, Ending::Finished(expected));
            assert_eq!(hook.fought, ["ogre"]);
            assert_eq!(input.reads(), 0);
        }
    }

    #[test]
    fn invalid_limit_ends_session() {
        let graph = fork();
        let config = GameConfig::default().with_max_invalid_attempts(2);
        let mut engine = NarrativeEngine::new(&graph, config);
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::new(["x", "y", "1"]);
        let mut hook = FixedHook::new(BattleOutcome::Victory);
        let err = engine.run(&mut renderer, &mut input, &mut hook);
        assert!(matches!(err, Err(StoryError::TooManyInvalid(2))));
        assert_eq!(renderer.invalid.len(), 2);
    }

    #[test]
    fn valid_selection_resets_invalid_streak() {
        let graph = fork();
        let config = GameConfig::default().with_max_invalid_attempts(2);
        let mut engine = NarrativeEngine::new(&graph, config);
        let mut renderer = Recorder::default();
        let mut input = ScriptedInput::new(["x", "2", "y", "1", "1"]);
        let mut hook = FixedHook::new(BattleOutcome::Victory);
        let ending = engine.run(&mut renderer, &mut input, &mut hook).unwrap();
        assert_eq!(ending, Ending::Finished(SceneId(2)));
    }

    #[test]
    fn parse_selection_bounds() {
        assert_eq!(parse_selection("1", 2).unwrap(), 0);
        assert_eq!(parse_selection(" 2\n", 2).unwrap(), 1);
        assert!(parse_selection("3", 2).is_err());
        assert!(parse_selection("0", 2).is_err());
        assert!(parse_selection("-1", 2).is_err());
        assert!(parse_selection("one", 2).is_err());
        assert!(parse_selection("1", 0).is_err());
    }

    proptest! {
        #[test]
        fn same_choices_same_path(choices in proptest::collection::vec(1usize..=2, 0..12)) {
            let lines: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let graph = fork();
            let (_, _, first) = play(&graph, &refs);
            let (_, _, second) = play(&graph, &refs);
            prop_assert_eq!(first, second);
        }
    }
}

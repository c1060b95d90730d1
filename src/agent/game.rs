//! The play / observe / infer loop.
//!
//! ## Phases
//!
//! `Seeding` places the known-legal seed cards. `Exploring` plays random
//! cards until enough evidence exists. `Refining` re-runs inference after
//! every play and steers card choice with the current best rule. The loop
//! ends `Converged` once the best rule has held for more than
//! `convergence_cycles` consecutive cycles, or `Exhausted` at `max_plays`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, info};

use super::arbiter::Arbiter;
use super::sampler::{CardSampler, RandomSampler};
use crate::board::BoardState;
use crate::cards::{Card, Characteristic};
use crate::core::{EleusisConfig, EleusisError, EleusisResult};
use crate::expr::ExpressionTree;
use crate::inference::{
    CompoundRule, CompoundRuleRanker, Evidence, Hypothesis, HypothesisEngine, TreeCompiler,
};

/// Where the agent is in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentPhase {
    Seeding,
    Exploring,
    Refining,
    Converged,
    Exhausted,
}

impl AgentPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, AgentPhase::Converged | AgentPhase::Exhausted)
    }
}

impl fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentPhase::Seeding => "seeding",
            AgentPhase::Exploring => "exploring",
            AgentPhase::Refining => "refining",
            AgentPhase::Converged => "converged",
            AgentPhase::Exhausted => "exhausted",
        })
    }
}

/// The agent's answer at the end of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompiledRule {
    /// Best rule found; `ExpressionTree::always()` if nothing could be
    /// inferred.
    pub tree: ExpressionTree,

    /// The compound the tree was compiled from, if any.
    pub compound: Option<CompoundRule>,

    /// `Converged` or `Exhausted`.
    pub terminal: AgentPhase,

    /// Plays made, seed cards excluded.
    pub plays: u32,
}

#[derive(Clone, Debug)]
struct Guess {
    rule: CompoundRule,
    tree: ExpressionTree,
}

/// Plays one game of Eleusis against an arbiter.
pub struct Agent<A: Arbiter, S: CardSampler> {
    config: EleusisConfig,
    arbiter: A,
    sampler: S,
    engine: HypothesisEngine,
    ranker: CompoundRuleRanker,

    board: BoardState,
    phase: AgentPhase,
    plays: u32,
    guess: Option<Guess>,
    fallback: Option<Hypothesis>,
    stable_cycles: u32,
    probe_next: bool,
}

impl<A: Arbiter> Agent<A, RandomSampler> {
    /// An agent drawing uniformly random cards seeded from the config.
    pub fn with_random_sampler(config: EleusisConfig, arbiter: A) -> Self {
        let sampler = RandomSampler::new(config.agent.seed);
        Self::new(config, arbiter, sampler)
    }
}

impl<A: Arbiter, S: CardSampler> Agent<A, S> {
    pub fn new(config: EleusisConfig, arbiter: A, sampler: S) -> Self {
        let engine = HypothesisEngine::new(config.inference.clone());
        let ranker = CompoundRuleRanker::new(config.inference.clone());
        Self {
            config,
            arbiter,
            sampler,
            engine,
            ranker,
            board: BoardState::new(),
            phase: AgentPhase::Seeding,
            plays: 0,
            guess: None,
            fallback: None,
            stable_cycles: 0,
            probe_next: false,
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    #[must_use]
    pub fn plays(&self) -> u32 {
        self.plays
    }

    /// Consecutive refinement cycles the current best rule has survived.
    #[must_use]
    pub fn stable_cycles(&self) -> u32 {
        self.stable_cycles
    }

    /// The current best compound, if one has emerged.
    #[must_use]
    pub fn current_rule(&self) -> Option<&CompoundRule> {
        self.guess.as_ref().map(|g| &g.rule)
    }

    /// Play a full game from up to two known-legal seed cards.
    ///
    /// Always terminates within `max_plays` plays and always yields a rule.
    pub fn run(&mut self, seed_cards: &[Card]) -> EleusisResult<CompiledRule> {
        self.config.validate()?;
        if seed_cards.len() > 2 {
            return Err(EleusisError::InvalidSequence(format!(
                "at most 2 seed cards, got {}",
                seed_cards.len()
            )));
        }
        self.reset(seed_cards);
        info!(
            seeds = seed_cards.len(),
            max_plays = self.config.agent.max_plays,
            "starting game"
        );

        self.enter(AgentPhase::Exploring);
        while self.plays < self.config.agent.max_plays {
            self.play();
            if self.plays < self.config.agent.exploration_plays {
                continue;
            }
            if self.phase == AgentPhase::Exploring {
                self.enter(AgentPhase::Refining);
            }
            self.refine()?;
            if self.stable_cycles > self.config.agent.convergence_cycles {
                self.enter(AgentPhase::Converged);
                break;
            }
        }
        if !self.phase.is_terminal() {
            self.enter(AgentPhase::Exhausted);
        }
        self.conclude()
    }

    fn reset(&mut self, seed_cards: &[Card]) {
        self.board = BoardState::with_accepted(seed_cards.iter().copied());
        self.phase = AgentPhase::Seeding;
        self.plays = 0;
        self.guess = None;
        self.fallback = None;
        self.stable_cycles = 0;
        self.probe_next = false;
    }

    fn enter(&mut self, phase: AgentPhase) {
        info!(from = %self.phase, to = %phase, plays = self.plays, "phase change");
        self.phase = phase;
    }

    /// Choose a card, ask the arbiter, record the verdict.
    fn play(&mut self) {
        let card = self.choose_card();
        let history = self.board.legal_sequence();
        let legal = self.arbiter.judge(card, &history);
        self.plays += 1;

        if legal {
            self.board.append_accepted(card);
        } else if let Err(error) = self.board.append_rejected(card) {
            debug!(%card, %error, "rejection not recorded");
        }
        debug!(play = self.plays, %card, legal, "play");
    }

    /// Random while exploring. While refining, alternate between a card
    /// the best rule predicts legal and a probe built to break it.
    fn choose_card(&mut self) -> Card {
        let guess = match (&self.guess, self.phase) {
            (Some(guess), AgentPhase::Refining) => guess,
            _ => return self.sampler.next_card(),
        };
        let probe = self.probe_next;
        self.probe_next = !probe;

        let current: SmallVec<[Characteristic; 5]> =
            guess.rule.members().iter().map(Hypothesis::current).collect();
        let excluded: SmallVec<[Characteristic; 10]> = if probe {
            current.into_iter().collect()
        } else {
            current.iter().flat_map(|tag| tag.negations()).collect()
        };
        let wanted = !probe;

        let mut card = self.sampler.next_card_avoiding(&excluded);
        for _ in 1..self.config.agent.probe_attempts {
            let predicted = guess.tree.holds(&self.board.window_for(card)).unwrap_or(false);
            if predicted == wanted {
                break;
            }
            card = self.sampler.next_card_avoiding(&excluded);
        }
        card
    }

    /// One inference cycle over the current board.
    fn refine(&mut self) -> EleusisResult<()> {
        let evidence = Evidence::from_board(&self.board);
        let hypotheses = self
            .engine
            .rank(&evidence, self.config.inference.use_triple_windows);
        self.fallback = hypotheses.best().map(|best| best.item.clone());

        let rules = self.ranker.scan_and_rank_rules(&hypotheses, &evidence);
        let Some(top) = rules.best() else {
            debug!(
                plays = self.plays,
                hypotheses = hypotheses.len(),
                "no compound rule this cycle"
            );
            self.guess = None;
            self.stable_cycles = 0;
            return Ok(());
        };

        if self.guess.as_ref().is_some_and(|g| g.rule == top.item) {
            self.stable_cycles += 1;
        } else {
            let tree = TreeCompiler::compile(&top.item)?;
            debug!(
                plays = self.plays,
                score = top.score,
                compound = %top.item,
                rule = %tree,
                "new leading rule"
            );
            self.guess = Some(Guess {
                rule: top.item.clone(),
                tree,
            });
            self.stable_cycles = 0;
        }
        Ok(())
    }

    fn conclude(&mut self) -> EleusisResult<CompiledRule> {
        if self.guess.is_none() {
            self.refine()?;
        }
        let (tree, compound) = match (&self.guess, &self.fallback) {
            (Some(guess), _) => (guess.tree.clone(), Some(guess.rule.clone())),
            (None, Some(best)) => (
                TreeCompiler::compile_hypothesis(best)?,
                Some(CompoundRule::single(best.clone())),
            ),
            (None, None) => (ExpressionTree::always(), None),
        };
        info!(
            terminal = %self.phase,
            plays = self.plays,
            accepted = self.board.accepted_count(),
            rejected = self.board.rejected_count(),
            rule = %tree,
            "game over"
        );
        Ok(CompiledRule {
            tree,
            compound,
            terminal: self.phase,
            plays: self.plays,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RuleArbiter;
    use crate::core::AgentConfig;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    /// Always offers the same card.
    struct Constant(Card);

    impl CardSampler for Constant {
        fn next_card(&mut self) -> Card {
            self.0
        }

        fn next_card_avoiding(&mut self, _excluded: &[Characteristic]) -> Card {
            self.0
        }
    }

    fn config(agent: AgentConfig) -> EleusisConfig {
        EleusisConfig::default().with_agent(agent)
    }

    #[test]
    fn test_too_many_seeds() {
        let mut agent = Agent::with_random_sampler(EleusisConfig::default(), |_: Card, _: &[Card]| true);
        let err = agent.run(&[card("2H"), card("4H"), card("6H")]).unwrap_err();
        assert!(matches!(err, EleusisError::InvalidSequence(_)));
    }

    #[test]
    fn test_invalid_config() {
        let cfg = config(AgentConfig::default().with_max_plays(0));
        let mut agent = Agent::with_random_sampler(cfg, |_: Card, _: &[Card]| true);
        assert!(matches!(agent.run(&[]), Err(EleusisError::Configuration(_))));
    }

    #[test]
    fn test_converges_on_constant_evidence() {
        let mut agent = Agent::new(
            EleusisConfig::default(),
            |_: Card, _: &[Card]| true,
            Constant(card("4H")),
        );
        let result = agent.run(&[]).unwrap();

        assert_eq!(result.terminal, AgentPhase::Converged);
        assert!(result.plays < 200);
        assert_eq!(agent.phase(), AgentPhase::Converged);
        assert!(agent.stable_cycles() > 10);
        assert!(result.compound.is_some());
        assert_eq!(result.compound.as_ref(), agent.current_rule());
    }

    #[test]
    fn test_nothing_accepted_yields_always() {
        let cfg = config(AgentConfig::default().with_max_plays(30));
        let mut agent = Agent::with_random_sampler(cfg, |_: Card, _: &[Card]| false);
        let result = agent.run(&[]).unwrap();

        assert_eq!(result.terminal, AgentPhase::Exhausted);
        assert_eq!(result.plays, 30);
        assert_eq!(result.tree, ExpressionTree::always());
        assert!(result.compound.is_none());
        assert!(agent.board().is_empty());
    }

    #[test]
    fn test_ceiling_during_exploration() {
        let cfg = config(AgentConfig::default().with_max_plays(5));
        let rule = ExpressionTree::parse("equal(color(previous), color(current))").unwrap();
        let mut agent = Agent::with_random_sampler(cfg, RuleArbiter::new(rule));
        let result = agent.run(&[card("2H")]).unwrap();

        assert_eq!(result.terminal, AgentPhase::Exhausted);
        assert_eq!(result.plays, 5);
        let board = agent.board();
        assert_eq!(board.accepted_count() + board.rejected_count(), 6);
    }

    #[test]
    fn test_seeds_are_on_the_board() {
        let cfg = config(AgentConfig::default().with_max_plays(1));
        let mut agent = Agent::with_random_sampler(cfg, |_: Card, _: &[Card]| false);
        agent.run(&[card("2H"), card("9S")]).unwrap();
        assert_eq!(agent.board().legal_sequence()[..2], [card("2H"), card("9S")]);
        assert_eq!(agent.board().rejected_count(), 1);
    }

    #[test]
    fn test_lost_compound_is_not_reported() {
        let mut agent = Agent::with_random_sampler(EleusisConfig::default(), |_: Card, _: &[Card]| true);
        agent.board = BoardState::with_accepted(["2S", "4S", "6S", "8S", "10S"].map(card));
        agent.refine().unwrap();
        assert!(agent.current_rule().is_some());

        // Two cards leave no 3-card window for compounds.
        agent.board = BoardState::with_accepted([card("2H"), card("4H")]);
        agent.refine().unwrap();
        assert!(agent.current_rule().is_none());
        assert_eq!(agent.stable_cycles(), 0);

        let hearts = Hypothesis::pair(
            Characteristic::Suit(crate::cards::Suit::Heart),
            Characteristic::Suit(crate::cards::Suit::Heart),
        );
        let result = agent.conclude().unwrap();
        assert_eq!(result.compound, Some(CompoundRule::single(hearts.clone())));
        assert_eq!(result.tree, TreeCompiler::compile_hypothesis(&hearts).unwrap());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(AgentPhase::Refining.to_string(), "refining");
        assert!(AgentPhase::Exhausted.is_terminal());
        assert!(!AgentPhase::Exploring.is_terminal());
    }
}

// Integration tests for the playback engine's control protocol

use std::time::Instant;

use sortty::engine::continuation::Algorithm;
use sortty::engine::errors::EngineError;
use sortty::engine::{DelayKind, Engine, DEFAULT_HISTORY_LIMIT};
use sortty::render::{HighlightSpec, Renderer};

/// Records every frame the engine emits.
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<(Vec<u32>, HighlightSpec)>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, sequence: &[u32], highlight: &HighlightSpec) {
        self.frames.push((sequence.to_vec(), highlight.clone()));
    }
}

fn zero_delay_engine(algorithm: Algorithm) -> Engine {
    let mut engine = Engine::new(algorithm, DEFAULT_HISTORY_LIMIT);
    engine.set_delay(DelayKind::Step, 0);
    engine.set_delay(DelayKind::Swap, 0);
    engine.set_delay(DelayKind::Merge, 0);
    engine
}

/// Tick until playback stops on its own.
fn run_until_stopped(engine: &mut Engine, renderer: &mut RecordingRenderer) {
    for _ in 0..1_000_000 {
        engine.tick(Instant::now(), renderer).expect("tick failed");
        if !engine.is_playing() {
            return;
        }
    }
    panic!("sort did not complete");
}

/// Tick exactly `n` micro-steps (delays must be zero).
fn tick_n(engine: &mut Engine, renderer: &mut RecordingRenderer, n: usize) {
    let before = engine.history_len();
    while engine.history_len() < before + n {
        assert!(engine.is_playing(), "playback stopped early");
        engine.tick(Instant::now(), renderer).expect("tick failed");
    }
}

#[test]
fn reset_generates_permutation() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();

    engine.reset(10, &mut renderer).expect("reset failed");

    let mut values = engine.sequence().to_vec();
    values.sort_unstable();
    assert_eq!(values, (0..10).collect::<Vec<u32>>());
    assert_eq!(engine.history_len(), 0);
    assert!(engine.continuation().is_none());
    assert!(!engine.is_playing());
    // The fresh array is rendered unhighlighted.
    let (frame, highlight) = renderer.frames.last().expect("no reset frame");
    assert_eq!(frame, engine.sequence());
    assert!(highlight.is_empty());
}

#[test]
fn reset_rejects_sizes_below_two() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![3, 1, 2], &mut renderer)
        .expect("reset failed");
    let generation = engine.generation();

    for size in [0, 1] {
        assert_eq!(
            engine.reset(size, &mut renderer),
            Err(EngineError::InvalidSize { size })
        );
    }

    // The previous sequence survives and the generation is not bumped.
    assert_eq!(engine.sequence(), &[3, 1, 2]);
    assert_eq!(engine.generation(), generation);
}

#[test]
fn pause_and_resume_match_uninterrupted_run() {
    let input = vec![7, 3, 9, 1, 5, 8, 2, 6, 4, 0];

    let mut uninterrupted = zero_delay_engine(Algorithm::Quick);
    let mut renderer = RecordingRenderer::default();
    uninterrupted
        .reset_with(input.clone(), &mut renderer)
        .expect("reset failed");
    uninterrupted.start();
    run_until_stopped(&mut uninterrupted, &mut renderer);
    let expected = uninterrupted.sequence().to_vec();

    let mut interrupted = zero_delay_engine(Algorithm::Quick);
    let mut renderer = RecordingRenderer::default();
    interrupted
        .reset_with(input, &mut renderer)
        .expect("reset failed");
    interrupted.start();
    for round in 0..1_000_000 {
        interrupted
            .tick(Instant::now(), &mut renderer)
            .expect("tick failed");
        if !interrupted.is_playing() {
            break;
        }
        // Interrupt every third step: pause, let the loop observe it,
        // then resume.
        if round % 3 == 0 {
            interrupted.pause();
            interrupted
                .tick(Instant::now(), &mut renderer)
                .expect("tick failed");
            assert!(!interrupted.is_playing());
            interrupted.start();
        }
    }

    assert_eq!(interrupted.sequence(), expected);
    assert_eq!(expected.len(), 10);
}

#[test]
fn pause_preserves_continuation() {
    let mut engine = zero_delay_engine(Algorithm::Merge);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![4, 2, 5, 1], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 5);

    engine.pause();
    let saved = engine.continuation().cloned();
    assert!(saved.is_some());

    // Paused ticks change nothing.
    for _ in 0..10 {
        engine.tick(Instant::now(), &mut renderer).expect("tick failed");
    }
    assert_eq!(engine.continuation().cloned(), saved);
    assert_eq!(engine.history_len(), 5);
}

#[test]
fn rewind_restores_exact_prior_state() {
    let mut engine = zero_delay_engine(Algorithm::Quick);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![3, 1, 4, 1, 5, 9, 2, 6], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 7);
    engine.pause();
    engine.tick(Instant::now(), &mut renderer).expect("tick failed");

    let saved_sequence = engine.sequence().to_vec();
    let saved_continuation = engine.continuation().cloned();

    // Five more steps forward, then five rewinds.
    engine.start();
    tick_n(&mut engine, &mut renderer, 5);
    engine.pause();
    for _ in 0..5 {
        engine.rewind(&mut renderer);
    }

    assert_eq!(engine.sequence(), saved_sequence);
    assert_eq!(engine.continuation().cloned(), saved_continuation);
    assert_eq!(engine.history_len(), 7);
}

#[test]
fn rewind_drains_to_pristine_state() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![5, 3, 1, 4, 2], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 6);
    engine.pause();

    while engine.history_len() > 0 {
        engine.rewind(&mut renderer);
    }
    assert_eq!(engine.sequence(), &[5, 3, 1, 4, 2]);

    // Further rewinds on an empty history are no-ops.
    let frames_before = renderer.frames.len();
    engine.rewind(&mut renderer);
    assert_eq!(engine.sequence(), &[5, 3, 1, 4, 2]);
    assert_eq!(renderer.frames.len(), frames_before);
}

#[test]
fn rewind_while_playing_pauses_first() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![5, 3, 1, 4, 2], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 4);
    assert!(engine.is_playing());

    engine.rewind(&mut renderer);

    assert!(!engine.is_playing());
    assert_eq!(engine.history_len(), 3);
}

#[test]
fn reentrant_start_is_a_noop() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![5, 3, 1, 4, 2], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 3);

    // A second start mid-flight must not reseed the continuation.
    let saved = engine.continuation().cloned();
    engine.start();
    assert_eq!(engine.continuation().cloned(), saved);
    assert_eq!(engine.history_len(), 3);
}

#[test]
fn reset_cancels_inflight_loop() {
    let mut engine = zero_delay_engine(Algorithm::Quick);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![3, 1, 4, 1, 5, 9, 2, 6], &mut renderer)
        .expect("reset failed");
    engine.start();
    tick_n(&mut engine, &mut renderer, 5);

    // Reset mid-flight: the orphaned loop must never touch the fresh data.
    let fresh = vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
    engine
        .reset_with(fresh.clone(), &mut renderer)
        .expect("reset failed");
    assert_eq!(engine.sequence(), fresh);
    assert_eq!(engine.history_len(), 0);
    assert!(engine.continuation().is_none());
    assert!(!engine.is_playing());

    // The orphaned loop's pending wakeup fires afterward: zero side
    // effects, zero renders.
    let frames_before = renderer.frames.len();
    engine.tick(Instant::now(), &mut renderer).expect("tick failed");
    engine.tick(Instant::now(), &mut renderer).expect("tick failed");
    assert_eq!(engine.sequence(), fresh);
    assert_eq!(renderer.frames.len(), frames_before);
}

#[test]
fn nonzero_delay_defers_the_next_step() {
    let mut engine = Engine::new(Algorithm::Bubble, DEFAULT_HISTORY_LIMIT);
    engine.set_delay(DelayKind::Step, 10_000);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![2, 1], &mut renderer)
        .expect("reset failed");

    let t0 = Instant::now();
    engine.start_at(t0);
    engine.tick(t0, &mut renderer).expect("tick failed");
    assert_eq!(engine.history_len(), 1);

    // The deadline is ten seconds out; an immediate tick does nothing.
    engine.tick(t0, &mut renderer).expect("tick failed");
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn zero_swap_delay_still_renders_the_swap() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![2, 1], &mut renderer)
        .expect("reset failed");
    engine.start();
    run_until_stopped(&mut engine, &mut renderer);

    // Frames: reset, comparison, swap, final unhighlighted.
    assert_eq!(renderer.frames.len(), 4);
    assert_eq!(renderer.frames[2].0, vec![1, 2]);
    assert!(!renderer.frames[2].1.is_empty());
}

#[test]
fn history_limit_pauses_playback_before_mutation() {
    let mut engine = Engine::new(Algorithm::Bubble, 8);
    engine.set_delay(DelayKind::Step, 0);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![2, 1], &mut renderer)
        .expect("reset failed");
    engine.start();

    let err = engine.tick(Instant::now(), &mut renderer);
    assert!(matches!(err, Err(EngineError::HistoryLimitExceeded { .. })));

    // The failed step never happened: no mutation, playback paused, the
    // continuation still resumable.
    assert_eq!(engine.sequence(), &[2, 1]);
    assert!(!engine.is_playing());
    assert!(engine.continuation().is_some());
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn manual_step_forward_while_paused() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![2, 1], &mut renderer)
        .expect("reset failed");

    engine.step_forward(&mut renderer).expect("step failed");
    assert_eq!(engine.sequence(), &[2, 1]); // comparison only
    engine.step_forward(&mut renderer).expect("step failed");
    assert_eq!(engine.sequence(), &[1, 2]); // swap landed
    assert_eq!(engine.history_len(), 2);
    assert!(!engine.is_playing());
}

#[test]
fn step_forward_is_ignored_while_playing() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![2, 1], &mut renderer)
        .expect("reset failed");
    engine.start();

    engine.step_forward(&mut renderer).expect("step failed");
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn start_after_completion_sorts_again() {
    let mut engine = zero_delay_engine(Algorithm::Merge);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![4, 2, 5, 1], &mut renderer)
        .expect("reset failed");
    engine.start();
    run_until_stopped(&mut engine, &mut renderer);
    assert!(engine.continuation().is_none());
    assert_eq!(engine.sequence(), &[1, 2, 4, 5]);

    // Starting again runs a fresh sort over the (already sorted) data.
    engine.start();
    assert!(engine.is_playing());
    run_until_stopped(&mut engine, &mut renderer);
    assert_eq!(engine.sequence(), &[1, 2, 4, 5]);
}

#[test]
fn generation_bumps_only_on_reset() {
    let mut engine = zero_delay_engine(Algorithm::Bubble);
    let mut renderer = RecordingRenderer::default();
    engine
        .reset_with(vec![3, 1, 2], &mut renderer)
        .expect("reset failed");
    let generation = engine.generation();

    engine.start();
    engine.pause();
    engine.rewind(&mut renderer);
    assert_eq!(engine.generation(), generation);

    engine.reset(10, &mut renderer).expect("reset failed");
    assert_eq!(engine.generation(), generation + 1);
}

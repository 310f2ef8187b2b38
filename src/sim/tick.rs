//! Fixed timestep simulation tick and shot resolution.
//!
//! Within one tick the order is fixed: countdown gate, spawn check, enemy
//! advance with bottom-boundary misses, then particle decay. `shoot` is not
//! part of the tick; the shell calls it synchronously between frames and it
//! mutates state immediately.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, GameEvent, GameState, MatchPhase, ParticleColor, SoundCue};
use crate::consts::*;
use crate::vocab::{Word, WordCategory};

/// Bounded redraws when a pick repeats the previous word
const REPEAT_DRAW_CAP: u32 = 10;

/// Advance the match by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != MatchPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if state.countdown.is_active() {
        if let Some(cue) = state.countdown.tick(dt) {
            state.push_sound(cue);
        }
        // Hold the spawn clock so the first word lands one full interval
        // after the countdown clears
        state.spawn_clock = SPAWN_INTERVAL / state.difficulty;
        advance_particles(state, dt);
        return;
    }

    // Spawn check
    state.spawn_clock -= dt;
    if state.spawn_clock <= 0.0 {
        spawn_enemy(state);
        state.spawn_clock = SPAWN_INTERVAL / state.difficulty;
    }

    // Enemy advance and bottom-boundary misses
    let mut i = 0;
    while i < state.enemies.len() {
        state.enemies[i].pos.y += state.enemies[i].speed * dt;
        if state.enemies[i].pos.y > FIELD_HEIGHT {
            let enemy = state.enemies.remove(i);
            let ended = state.lose_hp();
            if !ended && state.phase == MatchPhase::Playing {
                state.push_sound(SoundCue::Miss);
            }
            state.spawn_burst(
                Vec2::new(enemy.pos.x, FIELD_HEIGHT - 20.0),
                ParticleColor::Red,
            );
        } else {
            i += 1;
        }
    }

    advance_particles(state, dt);
}

fn advance_particles(state: &mut GameState, dt: f32) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= PARTICLE_DECAY * dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Resolve a category shot against the most urgent enemy.
///
/// Silently does nothing outside live play (menu, game over, countdown).
/// With no enemies on the field only the fire sound plays.
pub fn shoot(state: &mut GameState, category: WordCategory) {
    if state.phase != MatchPhase::Playing || state.countdown.is_active() {
        return;
    }

    state.push_sound(SoundCue::Shoot);

    let Some(idx) = target_index(&state.enemies) else {
        return;
    };

    if state.enemies[idx].word.category == category {
        let enemy = state.enemies.remove(idx);
        state.score += HIT_SCORE;
        state.difficulty += DIFFICULTY_STEP;
        state.spawn_burst(enemy.pos, ParticleColor::Green);
        state.push_sound(SoundCue::Hit);
    } else {
        state.push_sound(SoundCue::Error);
        state.lose_hp();
        state.spawn_burst(Vec2::new(TURRET_X, TURRET_Y), ParticleColor::Red);
    }
}

/// Index of the enemy closest to the bottom; first found wins ties
fn target_index(enemies: &[Enemy]) -> Option<usize> {
    let mut best = None;
    let mut max_y = f32::MIN;
    for (i, enemy) in enemies.iter().enumerate() {
        if enemy.pos.y > max_y {
            max_y = enemy.pos.y;
            best = Some(i);
        }
    }
    best
}

/// Pick a word, redrawing on an immediate repeat up to REPEAT_DRAW_CAP total
/// draws. A duplicate is accepted once the cap runs out - with tiny lists a
/// repeat is better than stalling the spawn.
fn choose_word(
    rng: &mut Pcg32,
    list: &'static [Word],
    last: Option<&str>,
) -> &'static Word {
    let mut word = &list[rng.random_range(0..list.len())];
    let mut attempts = 1;
    while Some(word.text) == last && list.len() > 1 && attempts < REPEAT_DRAW_CAP {
        word = &list[rng.random_range(0..list.len())];
        attempts += 1;
    }
    word
}

fn spawn_enemy(state: &mut GameState) {
    let list = state.mode.word_list();
    let word = {
        // Split borrow: the RNG lives inside the state we're mutating
        let last = state.last_word;
        choose_word(&mut state.rng, list, last)
    };
    state.last_word = Some(word.text);

    let x = state
        .rng
        .random_range(SPAWN_MARGIN..FIELD_WIDTH - SPAWN_MARGIN);
    let speed = (ENEMY_BASE_SPEED + state.rng.random_range(0.0..ENEMY_SPEED_BAND))
        * state.difficulty;
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, SPAWN_Y),
        word,
        speed,
        hit: false,
    });
    state.events.push(GameEvent::Speak(word.text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{GameMode, WordCategory, WORD_LIST};
    use rand::SeedableRng;

    fn word_of(category: WordCategory) -> &'static Word {
        WORD_LIST
            .iter()
            .find(|w| w.category == category)
            .expect("list covers every category")
    }

    fn push_enemy(state: &mut GameState, y: f32, category: WordCategory) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(240.0, y),
            word: word_of(category),
            speed: 90.0,
            hit: false,
        });
        id
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, GameMode::Normal);
        state.start_match(GameMode::Normal);
        run_countdown(&mut state);
        state.drain_events();
        state
    }

    fn run_countdown(state: &mut GameState) {
        while state.countdown.is_active() {
            tick(state, SIM_DT);
        }
    }

    fn sounds(state: &mut GameState) -> Vec<SoundCue> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound(cue) => Some(cue),
                GameEvent::Speak(_) => None,
            })
            .collect()
    }

    #[test]
    fn countdown_suppresses_simulation() {
        let mut state = GameState::new(7, GameMode::Normal);
        state.start_match(GameMode::Normal);
        let id = push_enemy(&mut state, 100.0, WordCategory::Noun);

        // Several seconds of countdown: no spawns, no movement
        for _ in 0..(3.0 / SIM_DT) as usize {
            tick(&mut state, SIM_DT);
            assert!(state.countdown.is_active());
        }
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, id);
        assert_eq!(state.enemies[0].pos.y, 100.0);

        // Shots are swallowed entirely
        state.drain_events();
        shoot(&mut state, WordCategory::Noun);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.drain_events().is_empty());

        run_countdown(&mut state);
        tick(&mut state, SIM_DT);
        assert!(state.enemies[0].pos.y > 100.0);
    }

    #[test]
    fn first_spawn_lands_one_interval_after_countdown() {
        let mut state = GameState::new(99, GameMode::Normal);
        state.start_match(GameMode::Normal);
        run_countdown(&mut state);
        assert!(state.enemies.is_empty());

        let mut elapsed = 0.0;
        while state.enemies.is_empty() {
            tick(&mut state, SIM_DT);
            elapsed += SIM_DT;
            assert!(elapsed < 5.0, "no spawn after {elapsed}s");
        }
        assert!((elapsed - SPAWN_INTERVAL).abs() < 3.0 * SIM_DT);
        // Spawn announces the word for pronunciation
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Speak(_))));
    }

    #[test]
    fn enemy_y_monotonic_until_removed() {
        let mut state = playing_state();
        push_enemy(&mut state, 0.0, WordCategory::Verb);
        let mut last_y = 0.0;
        while let Some(enemy) = state.enemies.first().copied() {
            assert!(enemy.pos.y >= last_y);
            last_y = enemy.pos.y;
            // Pin the spawn clock so only our enemy is on the field
            state.spawn_clock = 10.0;
            tick(&mut state, SIM_DT);
        }
        // It fell off the bottom and cost a hit point
        assert_eq!(state.hp, INITIAL_HP - 1);
    }

    #[test]
    fn correct_shot_removes_lowest_enemy_and_scores() {
        let mut state = playing_state();
        push_enemy(&mut state, 50.0, WordCategory::Noun);
        let low = push_enemy(&mut state, 300.0, WordCategory::Verb);
        push_enemy(&mut state, 120.0, WordCategory::Adjective);

        shoot(&mut state, WordCategory::Verb);

        assert_eq!(state.score, HIT_SCORE);
        assert_eq!(state.hp, INITIAL_HP);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies.iter().all(|e| e.id != low));
        assert!(!state.particles.is_empty());
        assert_eq!(sounds(&mut state), vec![SoundCue::Shoot, SoundCue::Hit]);
    }

    #[test]
    fn tie_breaks_to_first_found() {
        let mut state = playing_state();
        let first = push_enemy(&mut state, 200.0, WordCategory::Noun);
        push_enemy(&mut state, 200.0, WordCategory::Noun);

        shoot(&mut state, WordCategory::Noun);
        assert!(state.enemies.iter().all(|e| e.id != first));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn wrong_shot_costs_hp_and_keeps_enemy() {
        let mut state = playing_state();
        let id = push_enemy(&mut state, 300.0, WordCategory::Verb);

        shoot(&mut state, WordCategory::Noun);

        assert_eq!(state.score, 0);
        assert_eq!(state.hp, INITIAL_HP - 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, id);
        // Burst lands at the turret, not the enemy
        assert!(state.particles.iter().all(|p| p.pos.y > 500.0));
        assert_eq!(sounds(&mut state), vec![SoundCue::Shoot, SoundCue::Error]);
    }

    #[test]
    fn empty_field_shot_changes_nothing() {
        let mut state = playing_state();
        shoot(&mut state, WordCategory::Adjective);
        assert_eq!(state.score, 0);
        assert_eq!(state.hp, INITIAL_HP);
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        // Only the fire sound plays
        assert_eq!(sounds(&mut state), vec![SoundCue::Shoot]);
    }

    #[test]
    fn five_correct_shots_score_five_hundred() {
        let mut state = playing_state();
        for _ in 0..5 {
            push_enemy(&mut state, 100.0, WordCategory::Noun);
            shoot(&mut state, WordCategory::Noun);
        }
        assert_eq!(state.score, 5 * HIT_SCORE);
        assert_eq!(state.hp, INITIAL_HP);
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn difficulty_grows_with_kills_and_resets_on_restart() {
        let mut state = playing_state();
        let mut prev = state.difficulty;
        for _ in 0..4 {
            push_enemy(&mut state, 100.0, WordCategory::Verb);
            shoot(&mut state, WordCategory::Verb);
            assert!(state.difficulty > prev);
            prev = state.difficulty;
        }
        state.start_match(GameMode::Normal);
        assert_eq!(state.difficulty, 1.0);
    }

    #[test]
    fn fall_miss_costs_hp_and_buzzes() {
        let mut state = playing_state();
        // One tick of motion carries it past the boundary
        push_enemy(&mut state, FIELD_HEIGHT, WordCategory::Noun);
        state.drain_events();
        state.spawn_clock = 10.0;
        tick(&mut state, SIM_DT);

        assert!(state.enemies.is_empty());
        assert_eq!(state.hp, INITIAL_HP - 1);
        assert_eq!(sounds(&mut state), vec![SoundCue::Miss]);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn five_falls_end_the_match_once() {
        let mut state = playing_state();
        let mut defeats = 0;
        for _ in 0..INITIAL_HP {
            push_enemy(&mut state, FIELD_HEIGHT, WordCategory::Noun);
            state.spawn_clock = 10.0;
            tick(&mut state, SIM_DT);
            defeats += sounds(&mut state)
                .iter()
                .filter(|c| **c == SoundCue::Defeat)
                .count();
        }
        assert_eq!(state.hp, 0);
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(defeats, 1);

        // Further damage attempts are no-ops
        push_enemy(&mut state, FIELD_HEIGHT, WordCategory::Noun);
        tick(&mut state, SIM_DT);
        assert_eq!(state.hp, 0);
        assert_eq!(state.phase, MatchPhase::GameOver);
    }

    #[test]
    fn defeat_preempts_miss_cue_on_final_fall() {
        let mut state = playing_state();
        state.hp = 1;
        push_enemy(&mut state, FIELD_HEIGHT, WordCategory::Noun);
        state.drain_events();
        state.spawn_clock = 10.0;
        tick(&mut state, SIM_DT);
        let cues = sounds(&mut state);
        assert!(cues.contains(&SoundCue::Defeat));
        assert!(!cues.contains(&SoundCue::Miss));
    }

    #[test]
    fn wrong_shot_on_last_hp_plays_error_then_defeat() {
        let mut state = playing_state();
        state.hp = 1;
        push_enemy(&mut state, 300.0, WordCategory::Verb);
        shoot(&mut state, WordCategory::Noun);
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(
            sounds(&mut state),
            vec![SoundCue::Shoot, SoundCue::Error, SoundCue::Defeat]
        );
    }

    #[test]
    fn retry_clears_the_field() {
        let mut state = playing_state();
        push_enemy(&mut state, 100.0, WordCategory::Noun);
        push_enemy(&mut state, 200.0, WordCategory::Verb);
        shoot(&mut state, WordCategory::Noun); // wrong: particles + hp loss
        assert!(!state.particles.is_empty());

        state.start_match(GameMode::Normal);
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.hp, INITIAL_HP);
        assert_eq!(state.score, 0);
        assert!(state.countdown.is_active());
    }

    #[test]
    fn particles_expire() {
        let mut state = playing_state();
        push_enemy(&mut state, 300.0, WordCategory::Noun);
        shoot(&mut state, WordCategory::Noun);
        assert_eq!(state.particles.len(), BURST_SIZE);
        for p in &state.particles {
            assert!(p.life > 0.0 && p.life <= 1.0);
        }
        // Life 1.0 at decay 3.0/s is gone in well under a second
        state.spawn_clock = 10.0;
        for _ in 0..(1.0 / SIM_DT) as usize {
            tick(&mut state, SIM_DT);
            state.spawn_clock = 10.0;
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn single_word_list_accepts_repeat() {
        static LONE: &[Word] = &[Word {
            text: "Bridge",
            gloss: "橋",
            category: WordCategory::Noun,
        }];
        let mut rng = Pcg32::seed_from_u64(1);
        let first = choose_word(&mut rng, LONE, None);
        let second = choose_word(&mut rng, LONE, Some(first.text));
        assert_eq!(second.text, "Bridge");
    }

    #[test]
    fn repeat_guard_redraws_when_it_can() {
        static PAIR: &[Word] = &[
            Word {
                text: "Ship",
                gloss: "船",
                category: WordCategory::Noun,
            },
            Word {
                text: "Sea",
                gloss: "海",
                category: WordCategory::Noun,
            },
        ];
        let mut rng = Pcg32::seed_from_u64(42);
        let mut redrawn = 0;
        for _ in 0..50 {
            let word = choose_word(&mut rng, PAIR, Some("Ship"));
            if word.text == "Sea" {
                redrawn += 1;
            }
        }
        // Ten bounded draws make a surviving repeat vanishingly rare
        assert!(redrawn >= 45, "only {redrawn}/50 picks avoided the repeat");
    }

    #[test]
    fn spawned_enemies_use_the_mode_list() {
        let mut state = GameState::new(5, GameMode::Imabari);
        state.start_match(GameMode::Imabari);
        run_countdown(&mut state);
        for _ in 0..(3.0 / SIM_DT) as usize {
            tick(&mut state, SIM_DT);
        }
        assert!(!state.enemies.is_empty());
        for enemy in &state.enemies {
            assert!(GameMode::Imabari
                .word_list()
                .iter()
                .any(|w| w.text == enemy.word.text));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Action {
            Ticks(u16),
            Shoot(WordCategory),
        }

        fn action() -> impl Strategy<Value = Action> {
            prop_oneof![
                (1u16..240).prop_map(Action::Ticks),
                prop_oneof![
                    Just(WordCategory::Noun),
                    Just(WordCategory::Verb),
                    Just(WordCategory::Adjective),
                ]
                .prop_map(Action::Shoot),
            ]
        }

        proptest! {
            #[test]
            fn hp_and_difficulty_invariants(
                seed in 0u64..u64::MAX,
                actions in prop::collection::vec(action(), 1..40),
            ) {
                let mut state = GameState::new(seed, GameMode::Normal);
                state.start_match(GameMode::Normal);
                let mut max_difficulty = state.difficulty;

                for act in actions {
                    match act {
                        Action::Ticks(n) => {
                            for _ in 0..n {
                                tick(&mut state, SIM_DT);
                            }
                        }
                        Action::Shoot(cat) => shoot(&mut state, cat),
                    }
                    prop_assert!(state.hp <= INITIAL_HP);
                    prop_assert!(state.difficulty >= max_difficulty);
                    max_difficulty = state.difficulty;
                    if state.hp == 0 {
                        prop_assert_eq!(state.phase, MatchPhase::GameOver);
                    }
                    for p in &state.particles {
                        prop_assert!(p.life > 0.0);
                    }
                }
            }

            #[test]
            fn enemy_motion_never_reverses(
                seed in 0u64..u64::MAX,
                ticks in 1usize..2000,
            ) {
                let mut state = GameState::new(seed, GameMode::Normal);
                state.start_match(GameMode::Normal);
                let mut seen: std::collections::HashMap<u32, f32> =
                    std::collections::HashMap::new();

                for _ in 0..ticks {
                    tick(&mut state, SIM_DT);
                    for enemy in &state.enemies {
                        if let Some(prev) = seen.get(&enemy.id) {
                            prop_assert!(enemy.pos.y >= *prev);
                        }
                        seen.insert(enemy.id, enemy.pos.y);
                    }
                }
            }
        }
    }
}

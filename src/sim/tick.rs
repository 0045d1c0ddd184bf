//! Discrete simulation tick
//!
//! Each ball is advanced once, then tested against the arena walls, the
//! paddle and the blocks, in that order. Each test sees the ball as left by
//! the previous one.

use serde::{Deserialize, Serialize};

use super::collision::{Surface, bounce, check_boundary, check_rectangle};
use super::state::{BallState, BlockState, BreakoutState};
use crate::error::InvalidPaddleDir;
use crate::geom::Vector;

/// Paddle movement direction during a tick, used for english on paddle hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDir {
    Left,
    #[default]
    Still,
    Right,
}

impl PaddleDir {
    pub fn sign(self) -> i32 {
        match self {
            PaddleDir::Left => -1,
            PaddleDir::Still => 0,
            PaddleDir::Right => 1,
        }
    }
}

impl TryFrom<i32> for PaddleDir {
    type Error = InvalidPaddleDir;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(PaddleDir::Left),
            0 => Ok(PaddleDir::Still),
            1 => Ok(PaddleDir::Right),
            other => Err(InvalidPaddleDir(other)),
        }
    }
}

/// What a ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Paddle,
    Block,
}

/// Something that happened during a tick
///
/// `ball` is the ball's index in the collection before the tick started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A surface was struck; `reflected` is false when the angle test let the
    /// ball pass through
    Bounce {
        ball: usize,
        obstacle: Obstacle,
        surface: Surface,
        reflected: bool,
    },
    /// A block was hit and removed
    BlockDestroyed { ball: usize, block: BlockState },
    /// A ball crossed the bottom wall and was removed
    BallLost { ball: usize },
}

/// Advance the world by one step
///
/// Balls that cross the bottom wall are dropped; at most one block is removed
/// per ball. Survivors keep their relative order.
pub fn tick(state: &mut BreakoutState, paddle_dir: PaddleDir) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let english = state.tuning.english(paddle_dir.sign());
    let balls = std::mem::take(&mut state.balls);
    let mut survivors = Vec::with_capacity(balls.len());

    for (index, ball) in balls.iter().enumerate() {
        let mut next = ball.advanced();

        // Walls
        match check_boundary(&next, state.bottom_right) {
            Some(Surface::Bottom) => {
                log::debug!("Ball {} lost at {}", index, next.center());
                events.push(GameEvent::BallLost { ball: index });
                continue;
            }
            Some(surface) => {
                next = resolve(&next, surface, Vector::ZERO, index, Obstacle::Wall, &mut events);
            }
            None => {}
        }

        // Paddle
        let paddle = state.paddle;
        if let Some(surface) = check_rectangle(&next, paddle.top_left(), paddle.bottom_right()) {
            next = resolve(&next, surface, english, index, Obstacle::Paddle, &mut events);
        }

        // Blocks: first hit only
        let hit = state.blocks.iter().enumerate().find_map(|(i, block)| {
            check_rectangle(&next, block.top_left(), block.bottom_right()).map(|s| (i, s))
        });
        if let Some((block_index, surface)) = hit {
            let block = state.blocks.remove(block_index);
            log::debug!(
                "Ball {} destroyed block {}-{} ({} left)",
                index,
                block.top_left(),
                block.bottom_right(),
                state.blocks.len()
            );
            events.push(GameEvent::BlockDestroyed { ball: index, block });
            next = resolve(&next, surface, Vector::ZERO, index, Obstacle::Block, &mut events);
        }

        survivors.push(next);
    }

    state.balls = survivors;
    events
}

/// Bounce a ball, falling back to the unchanged ball when the bounce is rejected
fn resolve(
    ball: &BallState,
    surface: Surface,
    english: Vector,
    index: usize,
    obstacle: Obstacle,
    events: &mut Vec<GameEvent>,
) -> BallState {
    let bounced = bounce(ball, surface, english);
    match bounced {
        Some(_) => log::debug!("Ball {} bounced off {:?} {:?}", index, obstacle, surface),
        None => log::debug!(
            "Ball {} passed through {:?} {:?} (grazing)",
            index,
            obstacle,
            surface
        ),
    }
    events.push(GameEvent::Bounce {
        ball: index,
        obstacle,
        surface,
        reflected: bounced.is_some(),
    });
    bounced.unwrap_or(*ball)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::sim::state::PaddleState;
    use proptest::prelude::*;

    fn arena() -> Point {
        Point::new(200, 200)
    }

    /// Paddle parked in the bottom-left corner, out of the way
    fn parked_paddle() -> PaddleState {
        PaddleState::new(Point::new(10, 195), Vector::new(10, 2))
    }

    fn ball(x: i32, y: i32, vx: i32, vy: i32) -> BallState {
        BallState::new(Point::new(x, y), Vector::new(vx, vy), 10)
    }

    fn block(x0: i32, y0: i32, x1: i32, y1: i32) -> BlockState {
        BlockState::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_paddle_dir_conversion() {
        assert_eq!(PaddleDir::try_from(-1), Ok(PaddleDir::Left));
        assert_eq!(PaddleDir::try_from(0), Ok(PaddleDir::Still));
        assert_eq!(PaddleDir::try_from(1), Ok(PaddleDir::Right));
        assert_eq!(PaddleDir::try_from(2), Err(InvalidPaddleDir(2)));
        assert_eq!(PaddleDir::Left.sign(), -1);
    }

    #[test]
    fn test_free_flight() {
        let mut state =
            BreakoutState::new(vec![ball(100, 100, 3, -4)], vec![], arena(), parked_paddle())
                .unwrap();
        let events = state.tick(PaddleDir::Still);
        assert!(events.is_empty());
        assert_eq!(state.balls()[0].center(), Point::new(103, 96));
        assert_eq!(state.balls()[0].velocity(), Vector::new(3, -4));
    }

    #[test]
    fn test_top_wall_reflection() {
        let mut state =
            BreakoutState::new(vec![ball(50, 3, 0, -5)], vec![], arena(), parked_paddle())
                .unwrap();
        // Advanced to (50, -2); impact (50, -3) is past the top wall
        let events = state.tick(PaddleDir::Still);
        let b = state.balls()[0];
        assert_eq!(b.velocity(), Vector::new(0, 5));
        // Center is the advanced position plus the new velocity
        assert_eq!(b.center(), Point::new(50, 3));
        assert_eq!(
            events,
            vec![GameEvent::Bounce {
                ball: 0,
                obstacle: Obstacle::Wall,
                surface: Surface::Top,
                reflected: true,
            }]
        );
    }

    #[test]
    fn test_side_wall_reflection_keeps_vertical() {
        let mut state =
            BreakoutState::new(vec![ball(197, 100, 4, 3)], vec![], arena(), parked_paddle())
                .unwrap();
        state.tick(PaddleDir::Right);
        let b = state.balls()[0];
        assert_eq!(b.velocity(), Vector::new(-4, 3));
        assert_eq!(b.center(), Point::new(197, 106));
    }

    #[test]
    fn test_grazing_wall_passes_through() {
        let mut state = BreakoutState::new(
            vec![BallState::new(Point::new(50, 0), Vector::new(0, -1), 2)],
            vec![],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        let events = state.tick(PaddleDir::Still);
        let b = state.balls()[0];
        assert_eq!(b.velocity(), Vector::new(0, -1));
        assert_eq!(b.center(), Point::new(50, -1));
        assert!(matches!(
            events[0],
            GameEvent::Bounce {
                reflected: false,
                ..
            }
        ));
    }

    #[test]
    fn test_bottom_wall_loses_ball() {
        let mut state = BreakoutState::new(
            vec![ball(100, 198, 0, 5), ball(20, 20, 1, 1)],
            vec![block(150, 0, 160, 10)],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        let events = state.tick(PaddleDir::Still);
        assert_eq!(events, vec![GameEvent::BallLost { ball: 0 }]);
        assert_eq!(state.balls().len(), 1);
        assert_eq!(state.balls()[0].center(), Point::new(21, 21));
    }

    #[test]
    fn test_dead_after_last_ball_lost() {
        let mut state = BreakoutState::new(
            vec![ball(100, 198, 0, 5)],
            vec![block(0, 0, 20, 10)],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        assert!(!state.is_dead());
        state.tick(PaddleDir::Still);
        assert!(state.balls().is_empty());
        assert!(state.is_dead());
        assert!(!state.is_won());
    }

    #[test]
    fn test_paddle_bounce_with_english() {
        let paddle = PaddleState::new(Point::new(100, 180), Vector::new(30, 5));
        let mut state =
            BreakoutState::new(vec![ball(100, 170, 0, 6)], vec![], arena(), paddle).unwrap();
        // Advanced (100, 176); impact (100, 177) inside paddle 175..185, nearest top
        let events = state.tick(PaddleDir::Left);
        let b = state.balls()[0];
        // Mirrored to (0, -6), then english (0, -2)
        assert_eq!(b.velocity(), Vector::new(0, -8));
        assert_eq!(b.center(), Point::new(100, 168));
        assert_eq!(
            events,
            vec![GameEvent::Bounce {
                ball: 0,
                obstacle: Obstacle::Paddle,
                surface: Surface::Top,
                reflected: true,
            }]
        );
    }

    #[test]
    fn test_paddle_bounce_still_has_no_english() {
        let paddle = PaddleState::new(Point::new(100, 180), Vector::new(30, 5));
        let mut state =
            BreakoutState::new(vec![ball(100, 170, 2, 6)], vec![], arena(), paddle).unwrap();
        state.tick(PaddleDir::Still);
        assert_eq!(state.balls()[0].velocity(), Vector::new(2, -6));
    }

    #[test]
    fn test_grazing_paddle_passes_through() {
        let paddle = PaddleState::new(Point::new(100, 180), Vector::new(30, 5));
        let mut state = BreakoutState::new(
            vec![BallState::new(Point::new(100, 178), Vector::new(0, -1), 2)],
            vec![],
            arena(),
            paddle,
        )
        .unwrap();
        // Advanced (100, 177); impact (100, 176) is nearest the paddle top,
        // whose normal is exactly opposite the velocity
        let events = state.tick(PaddleDir::Right);
        let b = state.balls()[0];
        assert_eq!(b.velocity(), Vector::new(0, -1));
        assert_eq!(b.center(), Point::new(100, 177));
        assert_eq!(
            events,
            vec![GameEvent::Bounce {
                ball: 0,
                obstacle: Obstacle::Paddle,
                surface: Surface::Top,
                reflected: false,
            }]
        );
    }

    #[test]
    fn test_block_hit_removes_block_and_wins() {
        let mut state = BreakoutState::new(
            vec![ball(100, 40, 0, -5)],
            vec![block(80, 20, 120, 30)],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        // Advanced (100, 35): impact (100, 34) misses. Next tick advanced (100, 30):
        // impact (100, 29) is 1 from the bottom edge.
        state.tick(PaddleDir::Still);
        assert_eq!(state.blocks().len(), 1);
        let events = state.tick(PaddleDir::Still);

        assert!(state.blocks().is_empty());
        assert!(state.is_won());
        assert_eq!(state.balls()[0].velocity(), Vector::new(0, 5));
        assert_eq!(state.balls()[0].center(), Point::new(100, 35));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameEvent::BlockDestroyed { ball: 0, .. }));
        assert!(matches!(
            events[1],
            GameEvent::Bounce {
                obstacle: Obstacle::Block,
                surface: Surface::Bottom,
                ..
            }
        ));
    }

    #[test]
    fn test_only_first_block_hit() {
        // Two overlapping blocks: only the first in order is removed
        let first = block(80, 20, 120, 30);
        let second = block(90, 25, 110, 40);
        let mut state = BreakoutState::new(
            vec![ball(100, 33, 0, -5)],
            vec![first, second],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        state.tick(PaddleDir::Still);
        assert_eq!(state.blocks(), &[second]);
    }

    #[test]
    fn test_block_removed_even_when_bounce_rejected() {
        let mut state = BreakoutState::new(
            vec![BallState::new(Point::new(100, 26), Vector::new(0, -1), 2)],
            vec![block(80, 20, 120, 30)],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        state.tick(PaddleDir::Still);
        assert!(state.blocks().is_empty());
        assert_eq!(state.balls()[0].velocity(), Vector::new(0, -1));
        assert_eq!(state.balls()[0].center(), Point::new(100, 25));
    }

    #[test]
    fn test_corner_hit_prefers_top() {
        // Advanced to (79, 19); impact (80, 20) is the block's top-left corner
        let mut state = BreakoutState::new(
            vec![ball(74, 14, 5, 5)],
            vec![block(80, 20, 120, 30)],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        let events = state.tick(PaddleDir::Still);
        assert!(events.contains(&GameEvent::Bounce {
            ball: 0,
            obstacle: Obstacle::Block,
            surface: Surface::Top,
            reflected: true,
        }));
        assert_eq!(state.balls()[0].velocity(), Vector::new(5, -5));
    }

    #[test]
    fn test_survivor_order_preserved() {
        let mut state = BreakoutState::new(
            vec![ball(20, 20, 1, 0), ball(100, 198, 0, 5), ball(60, 60, 0, 1)],
            vec![],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        state.tick(PaddleDir::Still);
        let centers: Vec<_> = state.balls().iter().map(|b| b.center()).collect();
        assert_eq!(centers, vec![Point::new(21, 20), Point::new(60, 61)]);
    }

    #[test]
    fn test_second_ball_sees_first_balls_removal() {
        let target = block(80, 20, 120, 30);
        let mut state = BreakoutState::new(
            vec![ball(100, 33, 0, -5), ball(100, 33, 0, -5)],
            vec![target],
            arena(),
            parked_paddle(),
        )
        .unwrap();
        let events = state.tick(PaddleDir::Still);
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BlockDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        // Second ball flew on unchanged
        assert_eq!(state.balls()[1].velocity(), Vector::new(0, -5));
    }

    proptest! {
        #[test]
        fn prop_collections_only_shrink(
            balls in proptest::collection::vec((0i32..=200, 0i32..=200, -8i32..=8, -8i32..=8), 0..6),
            blocks in proptest::collection::vec((0i32..=180, 0i32..=120, 1i32..=20, 1i32..=20), 0..8),
            dirs in proptest::collection::vec(-1i32..=1, 1..40),
        ) {
            let balls = balls
                .into_iter()
                .map(|(x, y, vx, vy)| ball(x, y, vx, vy))
                .collect();
            let blocks = blocks
                .into_iter()
                .map(|(x, y, w, h)| block(x, y, x + w, y + h))
                .collect();
            let paddle = PaddleState::new(Point::new(100, 185), Vector::new(25, 4));
            let mut state = BreakoutState::new(balls, blocks, arena(), paddle).unwrap();

            for dir in dirs {
                let (before_balls, before_blocks) = (state.balls().len(), state.blocks().len());
                let events = state.tick(PaddleDir::try_from(dir).unwrap());
                let lost = events.iter().filter(|e| matches!(e, GameEvent::BallLost { .. })).count();
                let destroyed = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::BlockDestroyed { .. }))
                    .count();
                prop_assert_eq!(state.balls().len(), before_balls - lost);
                prop_assert_eq!(state.blocks().len(), before_blocks - destroyed);
                prop_assert!(destroyed <= before_balls);
            }
        }
    }
}

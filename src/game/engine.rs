use super::{
    action::Direction,
    config::{BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH, GameConfig, UNIT_SIZE},
    state::{CollisionType, GameState, Position, RunState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Fresh state: snake stacked on the top-left cell heading right, apple
    /// not placed until the game starts
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            Position::new(0, 0),
            self.config.initial_body_parts,
            BOARD_CELLS,
        );
        GameState::new(snake, Position::new(0, 0), Direction::Right)
    }

    /// Place the apple and mark the game as running
    pub fn start(&mut self, state: &mut GameState) {
        state.apple = self.new_apple();
        state.run_state = RunState::Running;
    }

    /// Execute one tick: turn, move, eat, then collide
    pub fn tick(&mut self, state: &mut GameState, direction: Direction) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome {
                ate_apple: false,
                collision_type: None,
            };
        }

        // Reversals are ignored, the snake keeps its heading
        if !state.heading.is_opposite(direction) {
            state.heading = direction;
        }
        state.snake.advance(state.heading);
        state.ticks += 1;

        let ate_apple = self.check_apple(state);
        let collision_type = self.check_collision(state);
        if collision_type.is_some() {
            state.run_state = RunState::Stopped;
        }

        TickOutcome {
            ate_apple,
            collision_type,
        }
    }

    fn check_apple(&mut self, state: &mut GameState) -> bool {
        if state.snake.head() != state.apple {
            return false;
        }
        state.snake.grow();
        state.score += 1;
        state.apple = self.new_apple();
        true
    }

    /// Check whether the head now sits on the body or outside the board
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        None
    }

    /// Pick a random cell; the snake's cells are not excluded
    fn new_apple(&mut self) -> Position {
        let x = self.rng.gen_range(0..BOARD_WIDTH / UNIT_SIZE) * UNIT_SIZE;
        let y = self.rng.gen_range(0..BOARD_HEIGHT / UNIT_SIZE) * UNIT_SIZE;
        Position::new(x, y)
    }
}

/// Scripted listboard session for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = demo::run() {
        eprintln!("listboard-demo error: {}", e);
        std::process::exit(1);
    }
}

// No filesystem or terminal on the web
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;
    use std::path::Path;
    use std::rc::Rc;
    use std::time::Duration;

    use listboard::{AppConfig, Board, JsonFileStore, Message};
    use listboard_ui::{Event, MemoryStore, MouseButton, PersistedStateStore, Point, SectionId};
    use web_time::Instant;

    /// 60 fps frame interval
    const FRAME: Duration = Duration::from_millis(16);

    /// Long enough for any expand/collapse animation to settle
    const SETTLE: Duration = Duration::from_millis(250);

    /// Synthetic frame clock driving the board
    struct Clock {
        now: Instant,
    }

    impl Clock {
        fn new() -> Self {
            Self {
                now: Instant::now(),
            }
        }

        /// Render frames covering `span`, returning every message they produced.
        fn advance(&mut self, board: &mut Board, span: Duration) -> Vec<Message> {
            let end = self.now + span;
            let mut messages = board.frame(self.now);
            while self.now + FRAME <= end {
                self.now += FRAME;
                messages.extend(board.frame(self.now));
            }
            messages
        }
    }

    fn header_point(board: &Board, id: &SectionId) -> Option<Point> {
        board
            .section_layout(id)
            .map(|l| (l.header.x + 10.0, l.header.y + l.header.height / 2.0))
    }

    fn report(step: &str, messages: &[Message]) {
        println!("-- {}", step);
        for message in messages {
            println!("   {:?}", message);
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let config = match std::env::args_os().nth(1) {
            Some(path) => AppConfig::load_from_path(Path::new(&path))?,
            None => AppConfig::load_from_default_path().unwrap_or_default(),
        };

        // RUST_LOG still overrides the configured level
        env_logger::Builder::new()
            .filter_level(config.log_level.to_level_filter())
            .parse_default_env()
            .init();
        log::info!(
            "Starting '{}' with {} sections",
            config.board_name,
            config.sections.len()
        );

        let store: Rc<dyn PersistedStateStore> = match &config.state_file {
            Some(path) => Rc::new(JsonFileStore::open(path)?),
            None => Rc::new(MemoryStore::new()),
        };
        let mut board = Board::from_config(&config, Rc::clone(&store))?;
        let mut clock = Clock::new();

        report("first frame", &clock.advance(&mut board, Duration::ZERO));

        let ids: Vec<SectionId> = board.sections().iter().map(|s| s.id().clone()).collect();
        let (Some(first), Some(last)) = (ids.first(), ids.last()) else {
            println!("Board has no sections");
            return Ok(());
        };

        // Tap the first header twice
        if let Some(position) = header_point(&board, first) {
            let tap = Event::MousePress {
                button: MouseButton::Left,
                position,
            };
            let mut messages = board.dispatch(&tap, clock.now);
            messages.extend(clock.advance(&mut board, SETTLE));
            messages.extend(board.dispatch(&tap, clock.now));
            messages.extend(clock.advance(&mut board, SETTLE));
            report("tap toggle", &messages);
        }

        // Programmatic collapse of the second section
        if let Some(second) = ids.get(1) {
            let mut messages: Vec<Message> = board.collapse(second)?.into_iter().collect();
            messages.extend(clock.advance(&mut board, SETTLE));
            report("programmatic collapse", &messages);
        }

        if ids.len() < 2 {
            println!("{}", board.render());
            return Ok(());
        }

        // Hover a card over the collapsed last section until it opens
        board.collapse(last)?;
        clock.advance(&mut board, SETTLE);
        if let Some(card) = next_card(&board, last) {
            let (source, card_id) = card;
            board.pick_up(&source, card_id)?;
            let mut messages = Vec::new();
            if let Some(position) = header_point(&board, last) {
                messages.extend(board.drag_to(position, clock.now));
            }
            messages.extend(clock.advance(&mut board, Duration::from_millis(450)));
            messages.extend(clock.advance(&mut board, SETTLE));
            match board.section_layout(last) {
                Some(layout) => {
                    let target = (10.0, layout.drop_target.y + 1.0);
                    messages.extend(board.drop_at(target, clock.now)?);
                }
                None => board.cancel_drag(clock.now),
            }
            report("hover auto-expand", &messages);
        }

        // Hover again, but drop before the delay runs out
        board.collapse(last)?;
        clock.advance(&mut board, SETTLE);
        if let (Some((source, card_id)), Some(position)) =
            (next_card(&board, last), header_point(&board, last))
        {
            board.pick_up(&source, card_id)?;
            let mut messages = board.drag_to(position, clock.now);
            messages.extend(clock.advance(&mut board, Duration::from_millis(300)));
            messages.extend(board.drop_at(position, clock.now)?);
            messages.extend(clock.advance(&mut board, Duration::from_millis(500)));
            report("hover aborted by drop", &messages);
        }

        // Remount the first section; its persisted state wins over the default
        if let Some(spec) = config.section(first.as_str()) {
            board.unmount(first)?;
            board.mount(spec)?;
            report("remount", &clock.advance(&mut board, FRAME));
        }

        println!();
        println!("{}", board.render());
        println!("Expansion changes:");
        for (id, expanded) in board.expansion_log() {
            println!("   {} -> {}", id, if *expanded { "expanded" } else { "collapsed" });
        }
        Ok(())
    }

    /// First card on the board outside `target`
    fn next_card(board: &Board, target: &SectionId) -> Option<(SectionId, u32)> {
        board
            .sections()
            .iter()
            .filter(|s| s.id() != target)
            .find_map(|s| s.items().first().map(|c| (s.id().clone(), c.id)))
    }
}

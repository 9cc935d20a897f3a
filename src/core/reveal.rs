//! Incremental reveal scheduler behind the animated terminal banner.
//!
//! The scheduler owns a fixed list of lines and reveals them one character
//! at a time.  It never reads a clock: callers pass the elapsed time since
//! mount to [`RevealScheduler::advance`] and sleep until
//! [`RevealScheduler::next_deadline`].  Every pending timer is a plain field
//! on the struct, so [`RevealScheduler::teardown`] (or dropping the value)
//! cancels all of them at once.

use std::time::Duration;

/// Period of the blinking caret.  Independent of typing speed.
pub const CURSOR_PERIOD: Duration = Duration::from_millis(600);

// ───────────────────────────────────────── configuration ─────

/// Call-to-action shown once every line has been revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Per-character delay for the first ("typed command") line.
    pub typing_speed: Duration,
    /// Per-character delay for every line after the first.
    pub burst_speed: Duration,
    /// Delay before the first character appears.
    pub start_delay: Duration,
    /// Pause after a finished line, as a multiple of that line's delay.
    pub line_pause_factor: u32,
    /// Render a blinking caret on the line being typed.
    pub cursor: bool,
    pub link: Option<Link>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(100),
            burst_speed: Duration::from_millis(15),
            start_delay: Duration::from_millis(1000),
            line_pause_factor: 5,
            cursor: true,
            link: None,
        }
    }
}

impl RevealConfig {
    /// Per-character delay used for line `index`.
    pub fn char_delay(&self, index: usize) -> Duration {
        if index == 0 {
            self.typing_speed
        } else {
            self.burst_speed
        }
    }

    /// Pause inserted after line `index` is fully revealed.
    pub fn line_pause(&self, index: usize) -> Duration {
        self.char_delay(index) * self.line_pause_factor
    }
}

// ───────────────────────────────────────── timers ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Start,
    Char,
    LinePause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer<K> {
    deadline: Duration,
    kind: K,
}

// ───────────────────────────────────────── phase ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting for the start delay.
    Idle,
    Typing { line: usize, column: usize },
    Done,
}

// ───────────────────────────────────────── scheduler ─────────

#[derive(Debug, Clone)]
pub struct RevealScheduler {
    lines: Vec<String>,
    revealed: Vec<String>,
    current_line: usize,
    current_char: usize,
    started: bool,
    config: RevealConfig,
    /// The single pending one-shot: start delay, next character, or the
    /// pause between lines.  Lines never animate concurrently.
    step_timer: Option<Timer<StepKind>>,
    /// Periodic caret toggle, armed for the whole mounted lifetime.
    cursor_timer: Option<Timer<()>>,
    cursor_visible: bool,
    torn_down: bool,
}

impl RevealScheduler {
    /// Mount a new playback of `lines`.  Nothing is revealed until
    /// `config.start_delay` has elapsed.
    pub fn mount(lines: Vec<String>, config: RevealConfig) -> Self {
        let cursor_timer = config.cursor.then_some(Timer {
            deadline: CURSOR_PERIOD,
            kind: (),
        });
        let scheduler = Self {
            step_timer: Some(Timer {
                deadline: config.start_delay,
                kind: StepKind::Start,
            }),
            cursor_timer,
            cursor_visible: true,
            lines,
            revealed: Vec::new(),
            current_line: 0,
            current_char: 0,
            started: false,
            config,
            torn_down: false,
        };
        tracing::debug!(
            lines = scheduler.lines.len(),
            start_delay_ms = scheduler.config.start_delay.as_millis() as u64,
            total_ms = scheduler.total_duration().as_millis() as u64,
            "reveal scheduler mounted"
        );
        scheduler
    }

    /// Cancel every pending timer.  No state changes after this call.
    pub fn teardown(&mut self) {
        self.step_timer = None;
        self.cursor_timer = None;
        self.torn_down = true;
    }

    /// Tear down and replay the same lines from the beginning.  The caller
    /// restarts its clock: the new playback's time origin is zero again.
    pub fn restart(&mut self) {
        self.teardown();
        let lines = std::mem::take(&mut self.lines);
        *self = Self::mount(lines, self.config.clone());
    }

    /// Earliest pending deadline, relative to mount.
    pub fn next_deadline(&self) -> Option<Duration> {
        let step = self.step_timer.map(|t| t.deadline);
        let cursor = self.cursor_timer.map(|t| t.deadline);
        match (step, cursor) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due at or before `now`.  Returns `true` when
    /// anything visible changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;
        loop {
            let step_due = self.step_timer.filter(|t| t.deadline <= now);
            let cursor_due = self.cursor_timer.filter(|t| t.deadline <= now);
            match (step_due, cursor_due) {
                (Some(step), Some(cursor)) if cursor.deadline < step.deadline => {
                    self.fire_cursor(cursor.deadline);
                }
                (Some(step), _) => self.fire_step(step),
                (None, Some(cursor)) => self.fire_cursor(cursor.deadline),
                (None, None) => break,
            }
            changed = true;
        }
        changed
    }

    fn fire_cursor(&mut self, deadline: Duration) {
        self.cursor_visible = !self.cursor_visible;
        self.cursor_timer = Some(Timer {
            deadline: deadline + CURSOR_PERIOD,
            kind: (),
        });
    }

    fn fire_step(&mut self, timer: Timer<StepKind>) {
        self.step_timer = None;
        match timer.kind {
            StepKind::Start => {
                self.started = true;
                self.begin_line(timer.deadline);
            }
            StepKind::Char => {
                let line = &self.lines[self.current_line];
                if let Some(c) = line.chars().nth(self.current_char) {
                    self.revealed[self.current_line].push(c);
                    self.current_char += 1;
                }
                self.arm_next_char(timer.deadline);
            }
            StepKind::LinePause => {
                self.current_line += 1;
                self.current_char = 0;
                self.begin_line(timer.deadline);
            }
        }
    }

    /// Open `revealed[current_line]` and arm its first step, or finish.
    fn begin_line(&mut self, at: Duration) {
        if self.current_line >= self.lines.len() {
            tracing::debug!("reveal scheduler complete");
            return;
        }
        self.revealed.push(String::new());
        self.arm_next_char(at);
    }

    fn arm_next_char(&mut self, at: Duration) {
        let index = self.current_line;
        let len = self.lines[index].chars().count();
        self.step_timer = Some(if self.current_char < len {
            Timer {
                deadline: at + self.config.char_delay(index),
                kind: StepKind::Char,
            }
        } else {
            Timer {
                deadline: at + self.config.line_pause(index),
                kind: StepKind::LinePause,
            }
        });
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.current_line >= self.lines.len()
    }

    #[cfg(test)]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> RevealPhase {
        if self.is_complete() && (self.started || self.lines.is_empty()) {
            RevealPhase::Done
        } else if !self.started {
            RevealPhase::Idle
        } else {
            RevealPhase::Typing {
                line: self.current_line,
                column: self.current_char,
            }
        }
    }

    /// Index of the line carrying the caret, if the caret is drawn now.
    pub fn caret_line(&self) -> Option<usize> {
        if !self.config.cursor || !self.cursor_visible {
            return None;
        }
        (self.current_line < self.revealed.len()).then_some(self.current_line)
    }

    /// The call-to-action, available only after every line is revealed.
    pub fn link(&self) -> Option<&Link> {
        if self.is_complete() {
            self.config.link.as_ref()
        } else {
            None
        }
    }

    /// Time from mount until the final line's pause has elapsed.
    pub fn total_duration(&self) -> Duration {
        self.lines
            .iter()
            .enumerate()
            .fold(self.config.start_delay, |acc, (i, line)| {
                let chars = line.chars().count() as u32;
                acc + self.config.char_delay(i) * chars + self.config.line_pause(i)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn config(typing: u64, burst: u64) -> RevealConfig {
        RevealConfig {
            typing_speed: ms(typing),
            burst_speed: ms(burst),
            start_delay: ms(1000),
            ..RevealConfig::default()
        }
    }

    #[test]
    fn idle_until_start_delay() {
        let mut s = RevealScheduler::mount(lines(&["cmd"]), config(80, 20));
        assert_eq!(s.phase(), RevealPhase::Idle);
        s.advance(ms(999));
        assert!(!s.has_started());
        assert!(s.revealed().is_empty());

        s.advance(ms(1000));
        assert!(s.has_started());
        assert_eq!(s.phase(), RevealPhase::Typing { line: 0, column: 0 });
        assert_eq!(s.revealed(), &[String::new()]);
    }

    #[test]
    fn first_line_uses_typing_speed_then_burst() {
        let mut s = RevealScheduler::mount(lines(&["ab", "cd"]), config(80, 20));
        s.advance(ms(1080));
        assert_eq!(s.revealed(), &["a".to_string()]);
        s.advance(ms(1160));
        assert_eq!(s.revealed(), &["ab".to_string()]);

        // Pause of 5 x 80ms before the second line opens.
        s.advance(ms(1559));
        assert_eq!(s.revealed().len(), 1);
        s.advance(ms(1560));
        assert_eq!(s.phase(), RevealPhase::Typing { line: 1, column: 0 });
        s.advance(ms(1580));
        assert_eq!(s.revealed()[1], "c");
    }

    #[test]
    fn full_playback_scenario() {
        let link = Link {
            label: "Get started".into(),
            destination: "/docs/intro".into(),
        };
        let cfg = RevealConfig {
            link: Some(link.clone()),
            ..config(80, 20)
        };
        let mut s = RevealScheduler::mount(lines(&["cmd", "log1", "log2"]), cfg);
        let total = s.total_duration();
        assert_eq!(total, ms(1000 + 3 * 80 + 400 + 4 * 20 + 100 + 4 * 20 + 100));

        s.advance(total - ms(1));
        assert!(!s.is_complete());
        assert!(s.link().is_none());

        s.advance(total);
        assert!(s.is_complete());
        assert_eq!(s.phase(), RevealPhase::Done);
        assert_eq!(s.revealed(), s.lines());
        assert_eq!(s.link(), Some(&link));
    }

    #[test]
    fn no_link_means_nothing_extra_when_done() {
        let mut s = RevealScheduler::mount(lines(&["cmd"]), config(80, 20));
        let total = s.total_duration();
        s.advance(total);
        assert!(s.is_complete());
        assert!(s.link().is_none());
    }

    #[test]
    fn empty_lines_are_paused_over() {
        let mut s = RevealScheduler::mount(lines(&["", "x"]), config(10, 10));
        s.advance(ms(1000));
        assert_eq!(s.phase(), RevealPhase::Typing { line: 0, column: 0 });
        s.advance(ms(1050));
        assert_eq!(s.phase(), RevealPhase::Typing { line: 1, column: 0 });
        s.advance(s.total_duration());
        assert_eq!(s.revealed(), s.lines());
    }

    #[test]
    fn multibyte_characters_reveal_whole() {
        let mut s = RevealScheduler::mount(lines(&["✔ ok"]), config(10, 10));
        s.advance(ms(1010));
        assert_eq!(s.revealed()[0], "✔");
    }

    #[test]
    fn teardown_stops_all_mutation() {
        let mut s = RevealScheduler::mount(lines(&["cmd", "log"]), config(80, 20));
        s.advance(ms(1100));
        let snapshot = s.revealed().to_vec();
        s.teardown();
        assert_eq!(s.next_deadline(), None);
        assert!(!s.advance(ms(60_000)));
        assert_eq!(s.revealed(), snapshot.as_slice());
        assert!(!s.is_complete());
    }

    #[test]
    fn restart_replays_same_lines() {
        let mut s = RevealScheduler::mount(lines(&["cmd"]), config(80, 20));
        s.advance(s.total_duration());
        assert!(s.is_complete());
        s.restart();
        assert!(!s.is_torn_down());
        assert_eq!(s.phase(), RevealPhase::Idle);
        assert_eq!(s.lines(), &["cmd".to_string()]);
        assert!(s.revealed().is_empty());
    }

    #[test]
    fn cursor_blinks_at_constant_period() {
        for speed in [5, 80, 400] {
            let mut s = RevealScheduler::mount(lines(&["long line here"]), config(speed, speed));
            let mut toggles = Vec::new();
            let mut prev = s.cursor_visible;
            for t in (0..=3000).step_by(5) {
                s.advance(ms(t));
                if s.cursor_visible != prev {
                    toggles.push(t);
                    prev = s.cursor_visible;
                }
            }
            assert_eq!(toggles, vec![600, 1200, 1800, 2400, 3000]);
        }
    }

    #[test]
    fn cursor_keeps_blinking_after_done() {
        let mut s = RevealScheduler::mount(lines(&["a"]), config(10, 10));
        s.advance(s.total_duration());
        assert!(s.is_complete());
        assert!(s.next_deadline().is_some());
        assert_eq!(s.caret_line(), None);
    }

    #[test]
    fn disabled_cursor_never_renders_caret() {
        let cfg = RevealConfig {
            cursor: false,
            ..config(10, 10)
        };
        let mut s = RevealScheduler::mount(lines(&["abc", "def"]), cfg);
        let total = s.total_duration();
        let mut t = Duration::ZERO;
        while t <= total {
            s.advance(t);
            assert_eq!(s.caret_line(), None);
            t += ms(7);
        }
        s.advance(total);
        assert!(s.is_complete());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn caret_follows_current_line() {
        let mut s = RevealScheduler::mount(lines(&["ab", "cd"]), config(100, 100));
        // Caret is in its hidden half-period between 600 and 1200.
        s.advance(ms(1100));
        assert_eq!(s.caret_line(), None);
        s.advance(ms(1250));
        assert_eq!(s.caret_line(), Some(0));
        // Line 0 finishes at 1200 and its pause ends at 1700.
        s.advance(ms(1750));
        assert_eq!(s.phase(), RevealPhase::Typing { line: 1, column: 0 });
        assert_eq!(s.caret_line(), Some(1));
        s.advance(ms(1800));
        assert_eq!(s.caret_line(), None);
    }

    #[test]
    fn empty_sequence_is_complete_immediately() {
        let s = RevealScheduler::mount(Vec::new(), config(10, 10));
        assert!(s.is_complete());
        assert_eq!(s.phase(), RevealPhase::Done);
    }

    proptest! {
        #[test]
        fn revealed_is_always_a_prefix(
            input in proptest::collection::vec("[a-z ✔]{0,12}", 0..6),
            typing in 1u64..120,
            burst in 1u64..40,
            step in 1u64..97,
        ) {
            let mut s = RevealScheduler::mount(input.clone(), config(typing, burst));
            let total = s.total_duration();
            let mut t = Duration::ZERO;
            while t <= total {
                s.advance(t);
                let current = s.revealed().len().saturating_sub(1);
                for (i, shown) in s.revealed().iter().enumerate() {
                    prop_assert!(input[i].starts_with(shown.as_str()));
                    if i < current {
                        prop_assert_eq!(shown, &input[i]);
                    }
                }
                prop_assert!(s.revealed().len() <= input.len());
                t += Duration::from_millis(step);
            }
            s.advance(total);
            prop_assert_eq!(s.revealed(), input.as_slice());
            prop_assert!(s.is_complete());
        }

        #[test]
        fn teardown_at_any_point_freezes_output(
            input in proptest::collection::vec("[a-z]{1,8}", 1..5),
            cut in 0u64..3000,
        ) {
            let mut s = RevealScheduler::mount(input, config(40, 10));
            s.advance(Duration::from_millis(cut));
            let frozen = s.revealed().to_vec();
            s.teardown();
            prop_assert!(!s.advance(Duration::from_secs(3600)));
            prop_assert_eq!(s.revealed(), frozen.as_slice());
        }
    }
}

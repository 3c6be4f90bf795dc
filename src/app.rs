use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::{
    challenge::Challenge,
    clock::{Clock, SystemClock},
    config::Theme,
    console::{Assistant, Console, OfflineAssistant},
    runtime::AppEvent,
};

/// Top-level state: both layouts live side by side, one is shown
pub struct App<C: Clock = SystemClock, A: Assistant = OfflineAssistant> {
    pub challenge: Challenge<C>,
    pub console: Console<A>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl<C: Clock, A: Assistant> App<C, A> {
    pub fn new(challenge: Challenge<C>, console: Console<A>, theme: Theme) -> Self {
        Self {
            challenge,
            console,
            theme,
            should_quit: false,
        }
    }

    /// Apply one event; returns whether the screen needs redrawing
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Tick => {
                self.challenge.on_tick();
                self.console.prune(Local::now());
                // live wpm and the console fade both depend on time
                true
            }
            AppEvent::Resize => true,
            AppEvent::Closed => {
                warn!("terminal input closed");
                self.should_quit = true;
                false
            }
            AppEvent::Paste(text) => {
                match self.theme {
                    Theme::Synth => {
                        let outcome = self.challenge.paste(&text);
                        debug!(?outcome, "paste");
                    }
                    Theme::Terminal => text
                        .chars()
                        .filter(|c| !c.is_control())
                        .for_each(|c| self.console.push_char(c)),
                }
                true
            }
            AppEvent::Key(key) => {
                self.on_key(key);
                true
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Tab => {
                self.theme = self.theme.toggle();
                debug!(theme = %self.theme, "theme switched");
            }
            _ => match self.theme {
                Theme::Synth => self.on_challenge_key(key, ctrl),
                Theme::Terminal => self.on_console_key(key),
            },
        }
    }

    fn on_challenge_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('r') if ctrl => self.challenge.reset(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.challenge.push_char(c),
            KeyCode::Backspace => self.challenge.backspace(),
            KeyCode::Enter => {
                self.challenge.mark_done();
            }
            _ => {}
        }
    }

    fn on_console_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.console.push_char(c),
            KeyCode::Backspace => self.console.backspace(),
            KeyCode::Enter => self.console.submit_line(Local::now()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        challenge::Phase, clock::ManualClock, profile::Profile, words::PromptSet,
        words::WordBank,
    };

    fn create_test_app(phrase: &str) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let challenge = Challenge::with_clock(WordBank::portfolio().unwrap(), 3, clock.clone())
            .with_prompt(PromptSet::from_phrase(phrase));
        let console = Console::new(Profile::embedded().unwrap(), OfflineAssistant);
        (App::new(challenge, console, Theme::Synth), clock)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn typing_keys_drive_the_challenge() {
        let (mut app, clock) = create_test_app("hi there");

        for c in "hi ther".chars() {
            app.handle_event(key(KeyCode::Char(c)));
            clock.advance_ms(100);
        }
        app.handle_event(key(KeyCode::Backspace));
        assert_eq!(app.challenge.input(), "hi the");

        app.handle_event(key(KeyCode::Char('r')));
        app.handle_event(key(KeyCode::Char('e')));
        assert_eq!(app.challenge.phase(), Phase::Finished);
    }

    #[test]
    fn enter_marks_done() {
        let (mut app, clock) = create_test_app("hi there");

        app.handle_event(key(KeyCode::Char('h')));
        clock.advance_ms(1_000);
        app.handle_event(key(KeyCode::Enter));

        assert_eq!(app.challenge.phase(), Phase::Finished);
        assert_eq!(app.challenge.final_wpm(), Some(12.0));
    }

    #[test]
    fn ctrl_r_resets_without_typing() {
        let (mut app, _clock) = create_test_app("hi there");

        app.handle_event(key(KeyCode::Char('h')));
        app.handle_event(ctrl('r'));

        assert_eq!(app.challenge.phase(), Phase::Idle);
        assert_eq!(app.challenge.input(), "");
    }

    #[test]
    fn paste_goes_through_cheat_detection() {
        let (mut app, _clock) = create_test_app("hi there");

        app.handle_event(AppEvent::Paste("hi there".to_string()));
        assert!(app.challenge.cheated());
        assert_eq!(app.challenge.input(), "");

        app.handle_event(AppEvent::Paste("hi".to_string()));
        assert_eq!(app.challenge.input(), "hi");
    }

    #[test]
    fn tab_switches_to_console() {
        let (mut app, _clock) = create_test_app("hi there");

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.theme, Theme::Terminal);

        for c in "help".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));

        assert_eq!(app.console.entries().len(), 1);
        assert_eq!(app.challenge.input(), "");
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let (mut app, _clock) = create_test_app("hi");
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit);

        let (mut app, _clock) = create_test_app("hi");
        app.handle_event(ctrl('c'));
        assert!(app.should_quit);
        assert_eq!(app.challenge.input(), "");
    }

    #[test]
    fn console_paste_drops_control_characters() {
        let (mut app, _clock) = create_test_app("hi there");
        app.handle_event(key(KeyCode::Tab));

        app.handle_event(AppEvent::Paste("ab\nout\tx\r".to_string()));
        assert_eq!(app.console.line(), "aboutx");
        assert!(app.console.entries().is_empty());
    }

    #[test]
    fn closed_input_quits() {
        let (mut app, _clock) = create_test_app("hi");

        assert!(!app.handle_event(AppEvent::Closed));
        assert!(app.should_quit);
    }

    #[test]
    fn tick_records_samples_while_active() {
        let (mut app, clock) = create_test_app("hi there");

        app.handle_event(key(KeyCode::Char('h')));
        clock.advance_ms(500);
        app.handle_event(AppEvent::Tick);

        assert_eq!(app.challenge.wpm_samples().len(), 1);
    }
}

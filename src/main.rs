//! Headless session-replay driver.
//!
//! Feeds a line-oriented interaction script through one
//! [`AnnotationWidget`] and prints what the hosting page would observe:
//! notices, the rendered display classes on demand, and the hidden-field
//! payload on submit. Useful for exercising the engine end-to-end
//! without a browser.
//!
//! Script commands (one per line, `#` starts a comment):
//!
//! ```text
//! mode dual|single
//! filler <placeholder text>
//! page <url>
//! referrer <url>
//! agent <user agent>
//! text <sentence>          # tokenizes and constructs the widget
//! select <start> <end>     # pointer-up with raw byte anchors
//! add because|but|claim
//! delete <display index>
//! applicable on|off
//! freetext <text>
//! render                   # print token classes and control state
//! submit
//! ```

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::Read;

use tokens::tokenize;
use widget::{
    AnnotationWidget, Notice, PageEnvironment, RawSelection, SelectionHost, SlotLabel, SlotMode,
    WidgetAction, WidgetConfig, WidgetEvent, render,
};

const NO_SENTENCE: &str = "no sentence loaded yet (use `text <sentence>`)";

struct ReplayHost;

impl SelectionHost for ReplayHost {
    fn clear_live_selection(&mut self) {
        log::trace!("live selection cleared");
    }

    fn notify(&mut self, notice: Notice) {
        let message = match notice {
            Notice::AcceptHit => "accept the HIT before annotating",
            Notice::UnsupportedBrowser => "this browser engine is not supported",
        };
        println!("notice: {message}");
    }
}

struct Replay {
    config: WidgetConfig,
    page: PageEnvironment,
    widget: Option<AnnotationWidget>,
    host: ReplayHost,
}

impl Replay {
    fn new() -> Self {
        Self {
            config: WidgetConfig::default(),
            page: PageEnvironment {
                page_url: "https://worker.mturk.com/task?assignmentId=REPLAY".into(),
                referrer: None,
                user_agent: "argspan-replay/0.1".into(),
            },
            widget: None,
            host: ReplayHost,
        }
    }

    fn widget(&mut self) -> Result<&mut AnnotationWidget, String> {
        self.widget.as_mut().ok_or_else(|| NO_SENTENCE.into())
    }

    fn dispatch(&mut self, event: WidgetEvent) -> Result<(), String> {
        let host = &mut self.host;
        let widget = self.widget.as_mut().ok_or_else(|| String::from(NO_SENTENCE))?;
        if let Some(WidgetAction::Submit { endpoint, payload }) = widget.handle_event(event, host) {
            println!("submit -> {}", endpoint.url());
            for (field, value) in payload.fields() {
                println!("  {field}={value}");
            }
        }
        Ok(())
    }

    fn command(&mut self, line: &str) -> Result<(), String> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "mode" => {
                self.config.mode = match rest {
                    "dual" => SlotMode::Dual,
                    "single" => SlotMode::Single,
                    other => return Err(format!("unknown mode `{other}`")),
                };
            }
            "filler" => self.config.filler = rest.to_string(),
            "page" => self.page.page_url = rest.to_string(),
            "referrer" => self.page.referrer = Some(rest.to_string()),
            "agent" => self.page.user_agent = rest.to_string(),
            "text" => {
                let widget =
                    AnnotationWidget::new(tokenize(rest), self.config.clone(), &self.page);
                widget.on_page_ready(&mut self.host);
                self.widget = Some(widget);
            }
            "select" => {
                let mut parts = rest.split_whitespace();
                let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err("select takes exactly two byte offsets".into());
                };
                let a: usize = a.parse().map_err(|_| format!("bad offset `{a}`"))?;
                let b: usize = b.parse().map_err(|_| format!("bad offset `{b}`"))?;
                self.dispatch(WidgetEvent::PointerUp(RawSelection::new(a, b)))?;
            }
            "add" => {
                let label = match rest {
                    "because" => SlotLabel::Because,
                    "but" => SlotLabel::But,
                    "claim" => SlotLabel::Claim,
                    other => return Err(format!("unknown slot `{other}`")),
                };
                self.dispatch(WidgetEvent::Commit(label))?;
            }
            "delete" => {
                let index: usize = rest.parse().map_err(|_| format!("bad index `{rest}`"))?;
                self.dispatch(WidgetEvent::Delete(index))?;
            }
            "applicable" => {
                let applicable = match rest {
                    "on" => true,
                    "off" => false,
                    other => return Err(format!("expected on/off, got `{other}`")),
                };
                self.dispatch(WidgetEvent::SetApplicable(applicable))?;
            }
            "freetext" => self.dispatch(WidgetEvent::FreeTextEdited(rest.to_string()))?,
            "render" => {
                let widget = self.widget()?;
                let classes = render::token_classes(widget.sequence(), widget.session());
                for (token, classes) in widget.sequence().iter().zip(classes) {
                    println!("{:<10} {:?} [{classes}]", token.id().as_str(), token.text());
                }
                println!("{:?}", render::control_state(widget));
            }
            "submit" => self.dispatch(WidgetEvent::Submit)?,
            other => return Err(format!("unknown command `{other}`")),
        }
        Ok(())
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let script = match args.as_slice() {
        [] => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("stdin: {e}"))?;
            buf
        }
        [path] => std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?,
        _ => return Err("usage: argspan [script]".into()),
    };

    let mut replay = Replay::new();
    for (number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        replay
            .command(line)
            .map_err(|err| format!("line {}: {err}", number + 1))?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("argspan: {err}");
        std::process::exit(1);
    }
}

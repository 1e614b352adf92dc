use crate::output::{print_error, print_info, print_trigger, print_trigger_list};
use scope_core::{SampleCurve, SampleWriter, ScopeData, ScopeEvent};
use serde_json::Value;
use signal::Subscription;
use std::io::BufRead;

const SAMPLE_CAPACITY: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Sample(f64),
    Add(f64),
    AddAt(f64),
    /// Raw tokens; coercion happens in the scope like it would for UI input.
    Update {
        id: String,
        hz: String,
        time_ms: String,
        vol: String,
    },
    Remove(u64),
    List,
    Level(f64),
    Norm(f64),
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T, String> {
    let token = token.ok_or_else(|| format!("missing {what}"))?;
    token
        .parse::<T>()
        .map_err(|_| format!("invalid {what} '{token}'"))
}

/// `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let command = match name {
        "sample" => SessionCommand::Sample(parse_number(tokens.next(), "value")?),
        "add" => SessionCommand::Add(parse_number(tokens.next(), "level")?),
        "add-at" => SessionCommand::AddAt(parse_number(tokens.next(), "y fraction")?),
        "update" => {
            let mut next = |what: &str| {
                tokens
                    .next()
                    .map(str::to_string)
                    .ok_or_else(|| format!("missing {what}"))
            };
            SessionCommand::Update {
                id: next("id")?,
                hz: next("hz")?,
                time_ms: next("time_ms")?,
                vol: next("vol")?,
            }
        }
        "remove" => SessionCommand::Remove(parse_number(tokens.next(), "id")?),
        "list" => SessionCommand::List,
        "level" => SessionCommand::Level(parse_number(tokens.next(), "y fraction")?),
        "norm" => SessionCommand::Norm(parse_number(tokens.next(), "level")?),
        other => return Err(format!("unknown command '{other}'")),
    };
    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected argument '{extra}'"));
    }
    Ok(Some(command))
}

pub struct Session {
    scope: ScopeData,
    writer: Option<SampleWriter>,
    events: Subscription<ScopeEvent>,
}

impl Session {
    pub fn new(mut scope: ScopeData) -> Self {
        let events = scope.subscribe();
        Self {
            scope,
            writer: None,
            events,
        }
    }

    /// Runs every line; a failing command is reported and the session goes on.
    pub fn run<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let result = parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(()),
            });
            if let Err(message) = result {
                print_error(&message);
            }
            for event in self.events.drain() {
                log::debug!("scope event {event:?}");
            }
        }
        Ok(())
    }

    fn sample_writer(&mut self) -> SampleWriter {
        if let Some(writer) = &self.writer {
            return writer.clone();
        }
        let curve = SampleCurve::new("in_0", SAMPLE_CAPACITY);
        let writer = curve.writer();
        self.scope.insert_plot_item(0, Box::new(curve));
        self.writer = Some(writer.clone());
        writer
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<(), String> {
        match command {
            SessionCommand::Sample(value) => {
                self.sample_writer()
                    .push(value)
                    .map_err(|err| err.to_string())?;
            }
            SessionCommand::Add(level) => self.add(level),
            SessionCommand::AddAt(y_frac) => {
                let level = self.scope.to_level(y_frac);
                self.add(level);
            }
            SessionCommand::Update {
                id,
                hz,
                time_ms,
                vol,
            } => {
                let message = self.scope.update_trigger_params(
                    &Value::String(id.clone()),
                    &Value::String(hz),
                    &Value::String(time_ms),
                    &Value::String(vol),
                );
                if !message.is_empty() {
                    return Err(message);
                }
                print_info(&format!("Trigger {id} updated"));
            }
            SessionCommand::Remove(id) => {
                if !self.scope.remove_trigger(id) {
                    return Err(format!("no trigger with id {id}"));
                }
                print_info(&format!("Trigger {id} removed"));
            }
            SessionCommand::List => print_trigger_list(self.scope.triggers()),
            SessionCommand::Level(y_frac) => println!("{}", self.scope.to_level(y_frac)),
            SessionCommand::Norm(level) => println!("{}", self.scope.to_normalized_y(level)),
        }
        Ok(())
    }

    fn add(&mut self, level: f64) {
        let id = self.scope.add_trigger(level);
        print_info(&format!("Trigger {id} added"));
        if let Some(trigger) = self.scope.trigger(id) {
            print_trigger(trigger);
        }
    }
}

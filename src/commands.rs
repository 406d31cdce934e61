// --------------------------------------------------
// Command dispatch table.
//
// Responsibilities:
// - Map command verbs (today/time, week, month, year) to argument parsers
// - Reject malformed arguments before anything is computed
// - Compute -> (dots for annual dot style) -> render -> reply
// --------------------------------------------------

use crate::clock;
use crate::dot_matrix;
use crate::error::{CommandError, RenderError};
use crate::host::{Host, ReplySink};
use crate::logic;
use crate::models::{ClockReading, PeriodKind, ProgressRequest, YearStyle};
use crate::render::{CardRenderer, ProgressCard, RenderedCard};

pub struct Command {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub parse: fn(&[&str]) -> Result<ProgressRequest, CommandError>,
}

impl Command {
    fn matches(&self, verb: &str) -> bool {
        self.name.eq_ignore_ascii_case(verb)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(verb))
    }
}

const TODAY_USAGE: &str = "  /today - progress through today\n  /today 14:00 21:00 - progress through a custom window";
const WEEK_USAGE: &str = "  /week - progress through this week";
const MONTH_USAGE: &str = "  /month - progress through this month";
const YEAR_USAGE: &str = "  /year - progress through this year\n  /year 1 - one dot per day (0 = bar)";

pub const COMMANDS: &[Command] = &[
    Command { name: "today", aliases: &["time"], usage: TODAY_USAGE, parse: parse_today },
    Command { name: "week", aliases: &[], usage: WEEK_USAGE, parse: parse_week },
    Command { name: "month", aliases: &[], usage: MONTH_USAGE, parse: parse_month },
    Command { name: "year", aliases: &[], usage: YEAR_USAGE, parse: parse_year },
];

pub fn find_command(verb: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.matches(verb))
}

// Usage lines of every command, shown after an unknown verb
pub fn help_text() -> String {
    COMMANDS.iter().map(|c| c.usage).collect::<Vec<_>>().join("\n")
}

// 0 args -> today, 2 args -> custom HH:MM window
fn parse_today(args: &[&str]) -> Result<ProgressRequest, CommandError> {
    match args {
        [] => Ok(ProgressRequest::new(PeriodKind::Today)),
        [start, end] => {
            if logic::parse_time_string(start).is_none() {
                return Err(CommandError::InvalidStartTime);
            }
            if logic::parse_time_string(end).is_none() {
                return Err(CommandError::InvalidEndTime);
            }
            let window = logic::parse_window(start, end).ok_or(CommandError::InvalidStartTime)?;
            Ok(ProgressRequest::new(window))
        }
        _ => Err(CommandError::Usage(TODAY_USAGE)),
    }
}

fn parse_week(args: &[&str]) -> Result<ProgressRequest, CommandError> {
    if !args.is_empty() {
        return Err(CommandError::Usage(WEEK_USAGE));
    }
    Ok(ProgressRequest::new(PeriodKind::Week))
}

fn parse_month(args: &[&str]) -> Result<ProgressRequest, CommandError> {
    if !args.is_empty() {
        return Err(CommandError::Usage(MONTH_USAGE));
    }
    Ok(ProgressRequest::new(PeriodKind::Month))
}

// 0 args -> bar, 1 arg -> style selector 0 | 1
fn parse_year(args: &[&str]) -> Result<ProgressRequest, CommandError> {
    let style = match args {
        [] => YearStyle::Bar,
        [n] => n
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(YearStyle::from_selector)
            .ok_or(CommandError::InvalidStyle)?,
        _ => return Err(CommandError::Usage(YEAR_USAGE)),
    };
    Ok(ProgressRequest { period: PeriodKind::Year, style })
}

/// Parse `"/today 14:00 21:00"` style text into a request.
pub fn parse_command_line(line: &str) -> Result<ProgressRequest, CommandError> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");
    let verb = verb.strip_prefix('/').unwrap_or(verb);
    let args: Vec<&str> = parts.collect();

    let command = find_command(verb).ok_or_else(|| CommandError::UnknownCommand(verb.to_string()))?;
    (command.parse)(&args)
}

// Pure part: compute the card values for a reading
pub fn compute_card(request: &ProgressRequest, now: &ClockReading) -> ProgressCard {
    if request.period == PeriodKind::Year && request.style == YearStyle::Dots {
        let annual = logic::compute_annual_progress(now);
        let dots = dot_matrix::build_dot_statuses(annual.day_of_year, annual.total_days_in_year);
        return ProgressCard { progress: annual.progress, dots: Some(dots) };
    }
    ProgressCard { progress: logic::compute_progress(&request.period, now), dots: None }
}

/// Resolve the clock from host settings, compute and render one card.
pub async fn run_request(
    request: &ProgressRequest,
    host: &dyn Host,
    renderer: &dyn CardRenderer,
) -> Result<RenderedCard, RenderError> {
    let settings = host.settings();
    let now = clock::resolve_clock(&settings.timezone, settings.debug_time, host.log());
    let card = compute_card(request, &now);

    if settings.debug_time {
        host.log().info(&format!(
            "[time debug] {}: {}/{} {}, {:.1}%",
            card.progress.title,
            card.progress.current_label,
            card.progress.total_label,
            card.progress.unit,
            card.progress.percentage
        ));
    }

    renderer.render(&card).await
}

/// Handle one line of command text, replying through `sink`.
///
/// Argument errors become a plain reply and never reach the calculator.
/// Render failures are logged and reported; they never panic.
pub async fn dispatch(
    line: &str,
    host: &dyn Host,
    renderer: &dyn CardRenderer,
    sink: &mut dyn ReplySink,
) {
    let request = match parse_command_line(line) {
        Ok(r) => r,
        Err(e @ CommandError::UnknownCommand(_)) => {
            sink.plain(format!("❌ {e}\n{}", help_text()));
            return;
        }
        Err(e) => {
            sink.plain(format!("❌ {e}"));
            return;
        }
    };

    match run_request(&request, host, renderer).await {
        Ok(card) => {
            host.log().info(&format!("generated {} card {}", card.title, card.id));
            sink.image(card);
        }
        Err(e) => {
            host.log().error(&format!("failed to generate progress card: {e}"));
            sink.plain(format!("❌ failed to generate progress card: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CollectedReplies, EventLog, RecordingLog, Reply};
    use crate::models::{DotStatus, Settings, TimeWindow};
    use crate::render::PayloadRenderer;
    use async_trait::async_trait;

    struct FakeHost {
        settings: Settings,
        log: RecordingLog,
    }

    impl FakeHost {
        fn with_timezone(tz: &str) -> Self {
            Self {
                settings: Settings { timezone: tz.to_string(), ..Settings::default() },
                log: RecordingLog::default(),
            }
        }
    }

    impl Host for FakeHost {
        fn settings(&self) -> Settings {
            self.settings.clone()
        }

        fn log(&self) -> &dyn EventLog {
            &self.log
        }
    }

    struct BrokenRenderer;

    #[async_trait]
    impl CardRenderer for BrokenRenderer {
        async fn render(&self, _card: &ProgressCard) -> Result<RenderedCard, RenderError> {
            Err(RenderError::Backend("browser not installed".to_string()))
        }
    }

    async fn run(line: &str, host: &FakeHost, renderer: &dyn CardRenderer) -> Vec<Reply> {
        let mut sink = CollectedReplies::default();
        dispatch(line, host, renderer, &mut sink).await;
        sink.replies
    }

    fn plain_text(replies: &[Reply]) -> &str {
        match replies {
            [Reply::Plain { text }] => text.as_str(),
            other => panic!("expected one plain reply, got {other:?}"),
        }
    }

    #[test]
    fn parses_today_variants() {
        assert_eq!(parse_command_line("/today").unwrap().period, PeriodKind::Today);
        assert_eq!(parse_command_line("time").unwrap().period, PeriodKind::Today);

        let r = parse_command_line("/today 22:00 6:00").unwrap();
        assert_eq!(
            r.period,
            PeriodKind::Window {
                window: TimeWindow { start_hour: 22, start_minute: 0, end_hour: 6, end_minute: 0 },
                label: "22:00-6:00".to_string(),
            }
        );
    }

    #[test]
    fn rejects_bad_today_arguments() {
        assert_eq!(parse_command_line("/today 25:00 21:00"), Err(CommandError::InvalidStartTime));
        assert_eq!(parse_command_line("/today 14:00 24:30"), Err(CommandError::InvalidEndTime));
        assert_eq!(parse_command_line("/today 14:00"), Err(CommandError::Usage(TODAY_USAGE)));
        assert_eq!(
            parse_command_line("/today 1:00 2:00 3:00"),
            Err(CommandError::Usage(TODAY_USAGE))
        );
    }

    #[test]
    fn week_and_month_take_no_arguments() {
        assert_eq!(parse_command_line("/week").unwrap().period, PeriodKind::Week);
        assert_eq!(parse_command_line("/MONTH").unwrap().period, PeriodKind::Month);
        assert_eq!(parse_command_line("/week 2"), Err(CommandError::Usage(WEEK_USAGE)));
        assert_eq!(parse_command_line("/month x"), Err(CommandError::Usage(MONTH_USAGE)));
    }

    #[test]
    fn year_style_selector() {
        assert_eq!(parse_command_line("/year").unwrap().style, YearStyle::Bar);
        assert_eq!(parse_command_line("/year 0").unwrap().style, YearStyle::Bar);
        assert_eq!(parse_command_line("/year 1").unwrap().style, YearStyle::Dots);
        assert_eq!(parse_command_line("/year 2"), Err(CommandError::InvalidStyle));
        assert_eq!(parse_command_line("/year dots"), Err(CommandError::InvalidStyle));
        assert_eq!(parse_command_line("/year 1 1"), Err(CommandError::Usage(YEAR_USAGE)));
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            parse_command_line("/decade"),
            Err(CommandError::UnknownCommand("decade".to_string()))
        );
    }

    #[test]
    fn dot_style_builds_one_dot_per_day() {
        let now = ClockReading {
            year: 2024,
            month: 4,
            day: 9,
            hour: 8,
            minute: 0,
            weekday: 1,
            day_of_year: 100,
        };
        let request = ProgressRequest { period: PeriodKind::Year, style: YearStyle::Dots };
        let card = compute_card(&request, &now);
        let dots = card.dots.expect("dot style");
        assert_eq!(dots.len(), 366);
        assert_eq!(dots[99], DotStatus::Today);
        assert_eq!(card.progress.total_label, "366");

        let bar = compute_card(&ProgressRequest::new(PeriodKind::Year), &now);
        assert!(bar.dots.is_none());
        assert_eq!(bar.progress, card.progress);
    }

    #[tokio::test]
    async fn dispatch_replies_with_card() {
        let host = FakeHost::with_timezone("Asia/Shanghai");
        let replies = run("/week", &host, &PayloadRenderer).await;
        match replies.as_slice() {
            [Reply::Image { card }] => {
                assert_eq!(card.title, "This Week");
                assert!(card.details.ends_with("/7 days"));
            }
            other => panic!("expected one image reply, got {other:?}"),
        }
        assert!(host.log.has(log::Level::Info, "generated This Week card"));
    }

    #[tokio::test]
    async fn dispatch_rejects_without_computing() {
        let host = FakeHost::with_timezone("Asia/Shanghai");
        let replies = run("/today 14", &host, &PayloadRenderer).await;
        assert!(plain_text(&replies).contains("usage"));
        assert!(host.log.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_verb_lists_commands() {
        let host = FakeHost::with_timezone("Asia/Shanghai");
        let replies = run("/decade", &host, &PayloadRenderer).await;
        let text = plain_text(&replies);
        assert!(text.contains("unknown command: decade"));
        assert!(text.contains("/year 1"));
    }

    #[tokio::test]
    async fn dispatch_reports_render_failure() {
        let host = FakeHost::with_timezone("Asia/Shanghai");
        let replies = run("/month", &host, &BrokenRenderer).await;
        assert!(plain_text(&replies).contains("browser not installed"));
        assert!(host.log.has(log::Level::Error, "browser not installed"));
    }

    #[tokio::test]
    async fn dispatch_logs_timezone_fallback() {
        let host = FakeHost::with_timezone("Not/AZone");
        let replies = run("/year 1", &host, &PayloadRenderer).await;
        assert!(matches!(replies.as_slice(), [Reply::Image { .. }]));
        assert!(host.log.has(log::Level::Warn, "Not/AZone"));
    }
}

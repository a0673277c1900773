use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use kaigi_application::{TimetableService, TimetableState};
use kaigi_core::timetable::{
    AnnotatedSession, Lang, Language, RoomType, TimetableFilters, TimetableView,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::utils::AppContext;

#[derive(Clone, Copy, ValueEnum)]
pub enum LangArg {
    Ja,
    En,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Ja => Lang::Ja,
            LangArg::En => Lang::En,
        }
    }
}

#[derive(Args)]
pub struct TimetableArgs {
    /// Read the timetable from a JSON file instead of the API
    #[arg(long)]
    source: Option<PathBuf>,

    /// Only show this day (YYYY-MM-DD); repeatable
    #[arg(long = "day")]
    days: Vec<NaiveDate>,

    /// Only show this room (e.g. flamingo); repeatable
    #[arg(long = "room", value_parser = parse_room)]
    rooms: Vec<RoomType>,

    /// Only show sessions spoken in this language (japanese, english, mixed); repeatable
    #[arg(long = "language", value_parser = parse_language)]
    languages: Vec<Language>,

    /// Only show favorited sessions
    #[arg(long)]
    favorites: bool,

    /// Match titles and speaker names
    #[arg(long)]
    query: Option<String>,

    /// Display language
    #[arg(long, value_enum, default_value = "ja")]
    lang: LangArg,
}

fn parse_room(value: &str) -> Result<RoomType, String> {
    value
        .parse()
        .map_err(|_| format!("unknown room '{}'", value))
}

fn parse_language(value: &str) -> Result<Language, String> {
    value
        .parse()
        .map_err(|_| format!("unknown language '{}'", value))
}

impl TimetableArgs {
    fn filters(&self) -> TimetableFilters {
        TimetableFilters {
            days: self.days.clone(),
            rooms: self.rooms.clone(),
            languages: self.languages.clone(),
            favorites_only: self.favorites,
            query: self.query.clone(),
        }
    }
}

pub async fn run(ctx: &AppContext, args: TimetableArgs) -> Result<()> {
    let source = ctx.session_source(args.source.clone())?;
    let favorites = Arc::new(ctx.favorite_store().await?);
    let service = TimetableService::new(source, favorites);
    service.set_filters(args.filters());

    let mut rx = service.observe_timetable_view();
    service
        .refresh()
        .await
        .context("Failed to fetch timetable")?;

    let state = rx
        .wait_for(|state| !state.is_loading())
        .await
        .map_err(|_| anyhow!("Timetable pipeline stopped unexpectedly"))?
        .clone();
    service.shutdown();

    if let TimetableState::Failed(e) = state {
        return Err(e).context("Failed to build timetable");
    }
    if let Some(view) = state.view() {
        print_view(view, args.lang.into());
    }
    Ok(())
}

fn print_view(view: &TimetableView, lang: Lang) {
    if view.is_empty() {
        println!("No sessions match.");
        return;
    }

    let mut current_day = None;
    for (slot, sessions) in view.slots() {
        let day = slot.starts_at.date_naive();
        if current_day != Some(day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", day.format("%Y-%m-%d (%a)"));
            current_day = Some(day);
        }

        println!("  {}", slot.label());
        for item in sessions {
            println!("    {}", session_line(item, lang));
        }
    }
}

fn session_line(item: &AnnotatedSession, lang: Lang) -> String {
    let session = &item.session;
    let mark = if item.is_favorited { '*' } else { ' ' };

    let mut line = format!(
        "{} [{}] {} ({})",
        mark,
        session.room.room_type,
        session.title.get(lang),
        session.id
    );
    if !session.speakers.is_empty() {
        let names: Vec<&str> = session.speakers.iter().map(|s| s.name.as_str()).collect();
        line.push_str(&format!(" / {}", names.join(", ")));
    }
    if let Some(message) = &session.message {
        line.push_str(&format!(" [{}]", message.get(lang)));
    }
    line
}

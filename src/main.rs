use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spellquest::achievements::{get_achievement_def, unlock_counts, ALL_ACHIEVEMENTS};
use spellquest::config::AppConfig;
use spellquest::core::clock::{Clock, SystemClock};
use spellquest::core::leveling::experience_to_next_level;
use spellquest::progress::{
    persist_completion, session_log_entry, streak_days, FileProgressStore, JsonSessionLog,
    ProgressStore, SessionLog,
};
use spellquest::session::{SessionHandle, SubmitResult};
use spellquest::utils::build_info::version_line;
use spellquest::utils::persistence::default_data_dir;
use spellquest::words::{JsonWordSource, Word, WordSource};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "spellquest", about = "Spelling practice for kids")]
struct Cli {
    /// Data directory (default: ~/.spellquest)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Practice a word list
    Practice {
        /// Word list to practice
        test_id: String,

        /// Help coins for this session (default from config.json)
        #[arg(long)]
        help_coins: Option<u32>,
    },
    /// Show level, streak and achievements
    Stats,
    /// List the available word lists
    Lists,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir().context("could not locate a data directory")?,
    };
    let config = AppConfig::load(&data_dir);

    match cli.command {
        Some(Command::Practice {
            test_id,
            help_coins,
        }) => {
            let coins = help_coins.unwrap_or(config.default_help_coins);
            run_practice(&data_dir, &config, &test_id, coins)
        }
        Some(Command::Stats) => show_stats(&data_dir),
        Some(Command::Lists) | None => show_lists(&data_dir, &config),
    }
}

fn word_source(data_dir: &Path, config: &AppConfig) -> Result<JsonWordSource> {
    let source = JsonWordSource::new(config.word_list_path(data_dir));
    source
        .ensure_exists()
        .with_context(|| format!("could not create {}", source.path().display()))?;
    Ok(source)
}

fn show_lists(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let source = word_source(data_dir, config)?;
    println!("Word lists in {}:", source.path().display());
    for test_id in source.test_ids()? {
        let count = source.load_words(&test_id)?.len();
        println!("  {:<20} {} words", test_id, count);
    }
    println!("\nStart with: spellquest practice <list>");
    Ok(())
}

/// First letter plus one blank per remaining letter.
fn word_hint(word: &Word) -> String {
    word.text
        .chars()
        .enumerate()
        .map(|(i, c)| if i == 0 { c.to_string() } else { "_".to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_feedback(result: &SubmitResult) {
    if result.is_correct {
        let stars = "★".repeat(result.stars as usize);
        print!("  ✅ Correct! +{} points {}", result.points.total_points, stars);
        if result.points.speed_bonus > 0 {
            print!("  ⚡ speedy");
        }
        if result.combo_multiplier > 1 {
            print!("  🔥 combo x{}", result.combo_multiplier);
        }
        println!();
    } else {
        println!("  ❌ Not quite. It's spelled \"{}\".", result.correct_spelling);
    }
    if result.perfect_bonus > 0 {
        println!("  💯 Perfect round! +{} bonus", result.perfect_bonus);
    }
    if result.leveled_up {
        println!("  🎉 Level up!");
    }
}

fn run_practice(data_dir: &Path, config: &AppConfig, test_id: &str, help_coins: u32) -> Result<()> {
    let source = word_source(data_dir, config)?;
    let words = source.load_words(test_id)?;
    let mut store = FileProgressStore::new(data_dir)?;
    let mut log = JsonSessionLog::new(data_dir);
    let clock = SystemClock;

    let progress = store.load_progress();
    let mut session = SessionHandle::setup(words, help_coins, progress, clock.now())?;

    println!("Practicing '{}': {} words", test_id, session.all_words().len());
    println!("Type the word and press Enter. Type ? to spend a help coin.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut revealed = String::new();

    while let Some(word) = session.current_word().cloned() {
        let round = session.round();
        print!(
            "[round {} · {}/{} · 🪙 {}] {}  > ",
            round.round_number,
            round.current_index + 1,
            round.words_in_round.len(),
            session.help_budget(),
            word_hint(&word)
        );
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => bail!("session abandoned before all words were mastered"),
        };

        if line.trim() == "?" {
            match session.use_help_coin(&revealed) {
                Ok(hint) => {
                    println!("  💡 It starts with \"{}\"", hint);
                    revealed = hint;
                }
                Err(e) => println!("  {}", e),
            }
            continue;
        }

        let result = session.submit_answer(word.id, &line, clock.now())?;
        revealed.clear();
        print_feedback(&result);

        if result.round_complete && !result.all_words_mastered {
            println!(
                "\n-- Round {} done! {} word(s) to practice again --\n",
                result.answered_round,
                session.round().words_in_round.len()
            );
            session.restart_word_timer(clock.now());
        }
    }

    let completed = session.complete_session(clock.now())?;
    let summary = &completed.summary;

    println!("\n🏁 All words mastered!");
    println!(
        "  Points: {}   Stars: {}   Rounds: {}   Time: {:.0}s",
        summary.points_earned, summary.stars_earned, summary.rounds_played, summary.round_time_seconds
    );
    println!(
        "  Best combo: {}   Avg stars per word: {:.1}",
        summary.best_combo,
        session.score().average_stars()
    );
    if completed.leveled_up() {
        println!(
            "  🎉 Level {} → {}",
            completed.level_before, completed.level_after
        );
    }
    for id in &completed.new_achievements {
        if let Some(def) = get_achievement_def(*id) {
            println!("  {} Achievement unlocked: {} - {}", def.icon, def.name, def.description);
        }
    }

    let today = clock.now().date_naive();
    let report = persist_completion(&mut store, &mut log, test_id, &completed, today);
    if let Some(message) = report.user_message() {
        println!("  ⚠️  {}", message);
        if report.progress_error.is_some() {
            match store.save(&completed.progress) {
                Ok(()) => println!("  Progress saved on retry."),
                Err(e) => println!("  Progress retry failed: {}", e),
            }
        }
        if report.log_error.is_some() {
            match log.append(session_log_entry(test_id, &completed, today)) {
                Ok(()) => println!("  Session log saved on retry."),
                Err(e) => println!("  Session log retry failed: {}", e),
            }
        }
    }
    Ok(())
}

fn show_stats(data_dir: &Path) -> Result<()> {
    let store = FileProgressStore::new(data_dir)?;
    let log = JsonSessionLog::new(data_dir);
    let progress = store.load_progress();

    let bar_len = 20;
    let filled = (progress.level_progress() * bar_len as f64) as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_len - filled));

    println!("Level {}  [{}]", progress.level(), bar);
    println!(
        "  XP: {} ({} to next level)",
        progress.experience_points,
        experience_to_next_level(progress.experience_points)
    );
    println!("  Points: {}   Stars: {}", progress.total_points, progress.total_stars);
    println!(
        "  Words mastered: {}   Sessions: {}",
        progress.total_words_mastered, progress.total_sessions_completed
    );

    let today = SystemClock.now().date_naive();
    match log.entries() {
        Ok(entries) => println!(
            "  Streak: {} day(s) (best {})",
            streak_days(&entries, today),
            progress.best_streak_days
        ),
        Err(e) => println!("  Streak unavailable: {}", e),
    }

    let (unlocked, total) = unlock_counts(&progress);
    println!("\nAchievements {}/{}", unlocked, total);
    for def in ALL_ACHIEVEMENTS {
        let mark = if progress.is_unlocked(def.id) { def.icon } else { "🔒" };
        println!("  {} {:<16} {}", mark, def.name, def.description);
    }
    Ok(())
}

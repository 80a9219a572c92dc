//! Wordle Advisor CLI
//!
//! Serves next-guess requests over TCP, answers one-off queries, and runs an
//! interactive session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use wordle_advisor::server::{run_server, ServerConfig};
use wordle_advisor::{
    AdvisorConfig, GuessRecord, Outcome, Word, WordList, WordleAdvisor,
    CANDIDATE_BIAS, MAX_GUESSES,
};

const BANNER_TEXT: &str = include_str!("text/banner.txt");

#[derive(Parser)]
#[command(name = "wordle-advisor", version, about = "Next-guess advisor for Wordle")]
struct Cli {
    #[command(flatten)]
    words: WordArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct WordArgs {
    /// Every word accepted as a guess, one per line
    #[arg(long, env = "WORDLE_VOCABULARY", default_value = "words/vocabulary.txt")]
    vocabulary: PathBuf,

    /// Every word that can be the answer, one per line
    #[arg(long, env = "WORDLE_ANSWERS", default_value = "words/answers.txt")]
    answers: PathBuf,

    /// How much better a non-answer guess must score to be preferred
    #[arg(long, default_value_t = CANDIDATE_BIAS)]
    bias: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Serve next-guess requests as line-delimited JSON over TCP
    Serve {
        #[arg(long, env = "WORDLE_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "WORDLE_PORT", default_value_t = 7878)]
        port: u16,
        /// Seconds allowed per request
        #[arg(long, env = "WORDLE_TIMEOUT_SECS", default_value_t = 30)]
        timeout: u64,
    },
    /// Print the next guess for a history given as word:pattern pairs
    Suggest {
        /// e.g. raise:BYBBG
        #[arg(value_parser = parse_record)]
        history: Vec<GuessRecord>,
    },
    /// Show the best-scoring guesses for a history
    Top {
        #[arg(short, long, default_value_t = 5)]
        n: usize,
        #[arg(value_parser = parse_record)]
        history: Vec<GuessRecord>,
    },
    /// Let the advisor play against a known word
    Solve { target: Word },
    /// Play every answer and report the guess distribution
    Benchmark,
}

fn parse_record(s: &str) -> Result<GuessRecord> {
    let Some((guess, feedback)) = s.split_once(':') else {
        bail!("expected word:pattern, got '{}'", s);
    };
    Ok(GuessRecord::parse(guess, feedback)?)
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn load_advisor(args: &WordArgs) -> Result<WordleAdvisor> {
    let config = AdvisorConfig { bias: args.bias };
    config.validate().context("invalid --bias")?;
    let vocabulary = WordList::load(&args.vocabulary).context("loading vocabulary")?;
    let answers = WordList::load(&args.answers).context("loading answers")?;
    Ok(WordleAdvisor::with_config(vocabulary, answers, config)?)
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Guess { guess, remaining } => {
            println!("Next guess: {}", guess.word.to_uppercase());
            println!("  Entropy: {:.3} bits", guess.entropy_bits(*remaining));
            if guess.is_candidate {
                println!("  ✓ This word is a possible answer");
            } else {
                println!("  ✗ This word is NOT a possible answer");
            }
            println!("Remaining possibilities: {}", remaining);
            if *remaining == 0 {
                println!("⚠️  No answer matches this history; the guess is best-effort.");
            }
        }
        Outcome::NotAWord(word) => {
            println!("'{}' is not a valid 5 letter word.", word.to_uppercase());
        }
        Outcome::NoGuessAvailable => {
            println!("No guess available.");
        }
    }
}

fn print_top(advisor: &WordleAdvisor, history: &[GuessRecord], n: usize) {
    if let Some(word) = advisor.unknown_guess(history) {
        println!("'{}' is not a valid 5 letter word.", word.to_uppercase());
        return;
    }
    let remaining = advisor.candidates(history).len();
    let top = advisor.top_guesses(history, n);
    if top.is_empty() {
        println!("No guesses available.");
        return;
    }

    println!();
    println!("Top {} guesses:", top.len());
    println!("{:>4} {:>8} {:>10} {:>8} Possible?", "#", "Word", "Score", "Entropy");
    println!("{}", "-".repeat(46));
    for (i, scored) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:>10.3} {:>8.3} {}",
            i + 1,
            scored.word.to_uppercase(),
            scored.score,
            scored.entropy_bits(remaining),
            if scored.is_candidate { "✓" } else { "" }
        );
    }
    println!();
}

fn print_solve(advisor: &WordleAdvisor, target: &Word) {
    println!("Solving for: {}", target.to_uppercase());
    println!();

    let guesses = advisor.solve_for_target(target, MAX_GUESSES);
    for (i, record) in guesses.iter().enumerate() {
        println!(
            "Guess {}: {} → {}",
            i + 1,
            record.guess.to_uppercase(),
            record.feedback.to_emoji_string()
        );
    }

    println!();
    match guesses.last() {
        Some(last) if last.feedback.is_win() => println!("✓ Solved in {} guesses!", guesses.len()),
        _ => println!("✗ Failed to solve within {} guesses.", MAX_GUESSES),
    }
}

fn run_benchmark(advisor: &WordleAdvisor) {
    println!("Running benchmark on all {} answers...", advisor.answers().len());

    let spinner = Spinner::new("Computing...");
    let start = std::time::Instant::now();
    let report = advisor.benchmark_distribution(MAX_GUESSES);
    let elapsed = start.elapsed();
    spinner.stop();

    let total = report.games().max(1);
    println!("Guess distribution:");
    for (guesses, count) in &report.distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
    }
    println!();
    println!("Average guesses: {:.3}", report.average());
    println!("Total words: {}", report.games());
    println!("Time elapsed: {:.2?}", elapsed);
    if report.failures > 0 {
        println!("Words not solved in {} guesses: {}", MAX_GUESSES, report.failures);
    } else {
        println!("✓ All words solved within {} guesses!", MAX_GUESSES);
    }
}

fn run_interactive(advisor: &WordleAdvisor) -> Result<()> {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{}", line);
    }
    println!(
        "Loaded {} guess words and {} answers.",
        advisor.vocabulary().len(),
        advisor.answers().len()
    );
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let mut history: Vec<GuessRecord> = Vec::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", BANNER_TEXT),
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "best" => {
                println!();
                print_outcome(&advisor.advise(&history));
                println!();
            }
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                print_top(advisor, &history, n);
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    println!("Example: feedback raise BYBBG");
                    continue;
                }
                let record = match GuessRecord::parse(parts[1], parts[2]) {
                    Ok(record) => record,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if !advisor.vocabulary().contains(&record.guess) {
                    println!("'{}' is not a valid 5 letter word.", record.guess.to_uppercase());
                    continue;
                }
                let (word, pattern) = (record.guess, record.feedback);

                let prev_count = advisor.candidates(&history).len();
                history.push(record);
                let remaining = advisor.candidates(&history);

                println!();
                println!("Guess: {}", word.to_uppercase());
                println!("Feedback: {}", pattern.to_emoji_string());
                println!(
                    "Eliminated {} words ({} → {})",
                    prev_count - remaining.len(),
                    prev_count,
                    remaining.len()
                );
                if pattern.is_win() {
                    println!();
                    println!("🎉 Congratulations! You solved it!");
                } else if remaining.is_empty() {
                    println!();
                    println!("⚠️  No words match this feedback pattern!");
                    println!("This might indicate an error. Use 'undo' or 'reset'.");
                } else if remaining.len() <= 10 {
                    println!();
                    println!(
                        "Remaining words: {:?}",
                        remaining.iter().map(Word::to_uppercase).collect::<Vec<_>>()
                    );
                }
                println!();
            }
            "remaining" | "r" | "left" => {
                let remaining = advisor.candidates(&history);
                println!();
                println!("Remaining possibilities: {}", remaining.len());
                if remaining.len() <= 20 {
                    for (i, word) in remaining.iter().enumerate() {
                        if i > 0 && i % 10 == 0 {
                            println!();
                        }
                        print!("{:>8}", word.to_uppercase());
                    }
                    println!();
                }
                println!();
            }
            "undo" | "u" => match history.pop() {
                Some(record) => println!("Removed {} {}", record.guess.to_uppercase(), record.feedback),
                None => println!("Nothing to undo."),
            },
            "solve" => {
                let target = match parts.get(1).map(|s| s.parse::<Word>()) {
                    Some(Ok(w)) => w,
                    Some(Err(e)) => {
                        println!("Invalid word: {}", e);
                        continue;
                    }
                    None => {
                        println!("Usage: solve <target_word>");
                        continue;
                    }
                };
                println!();
                print_solve(advisor, &target);
                println!();
            }
            "reset" => {
                history.clear();
                println!(
                    "Reset to initial state. {} answers possible.",
                    advisor.answers().len()
                );
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let advisor = load_advisor(&cli.words)?;

    match cli.command {
        None => run_interactive(&advisor)?,
        Some(Command::Serve {
            host,
            port,
            timeout,
        }) => {
            let config = ServerConfig {
                host,
                port,
                request_timeout: Duration::from_secs(timeout),
            };
            info!("Candidate bias {}", advisor.config().bias);
            let runtime = tokio::runtime::Runtime::new().context("starting runtime")?;
            runtime.block_on(run_server(config, Arc::new(advisor), None))?;
        }
        Some(Command::Suggest { history }) => print_outcome(&advisor.advise(&history)),
        Some(Command::Top { n, history }) => print_top(&advisor, &history, n),
        Some(Command::Solve { target }) => print_solve(&advisor, &target),
        Some(Command::Benchmark) => run_benchmark(&advisor),
    }

    Ok(())
}

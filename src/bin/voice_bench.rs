//! voice-bench — operator console for the ElevenLabs text-to-speech API
//!
//! Usage:
//!   voice-bench status                       Check the API key and connectivity
//!   voice-bench models                       List the model catalog
//!   voice-bench voices [--refresh]           List available voices
//!   voice-bench settings <voice>             Show a voice's default settings
//!   voice-bench say [OPTIONS] [TEXT]         Synthesize and save the audio
//!   voice-bench shell                        Interactive session

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use voice_bench::bench::{BenchSession, SynthesisControls, SAMPLE_TEXT};
use voice_bench::transport::SpeechTransport;
use voice_bench::{BenchConfig, OutputFormat, SynthesisResult, TtsClient, Voice, VoiceSettings};

#[derive(Parser, Debug)]
#[command(name = "voice-bench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Test bench for ElevenLabs text-to-speech")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the API key and connectivity
    Status,
    /// List the model catalog
    Models,
    /// List available voices
    Voices {
        /// Drop the cached listing and fetch it again
        #[arg(long)]
        refresh: bool,
    },
    /// Show a voice's default settings
    Settings {
        /// Voice id or name
        voice: String,
    },
    /// Synthesize text and save the audio
    Say(SayArgs),
    /// Interactive session that keeps the voice cache and last audio
    Shell,
}

#[derive(ClapArgs, Debug)]
struct SayArgs {
    /// Text to synthesize (defaults to a sample paragraph)
    text: Option<String>,

    /// Voice id or name (defaults to the first listed voice)
    #[arg(long)]
    voice: Option<String>,

    #[arg(long, default_value = voice_bench::tts::DEFAULT_MODEL_ID)]
    model: String,

    #[arg(long, default_value = "mp3_44100_128")]
    format: OutputFormat,

    /// Override the voice's default stability
    #[arg(long)]
    stability: Option<f32>,

    #[arg(long)]
    similarity_boost: Option<f32>,

    #[arg(long)]
    style: Option<f32>,

    #[arg(long)]
    no_speaker_boost: bool,

    #[arg(long, default_value_t = voice_bench::bench::DEFAULT_SPEED)]
    speed: f32,

    #[arg(long)]
    seed: Option<u32>,

    /// Force a language, e.g. 'en' or 'es'
    #[arg(long, default_value = "")]
    language: String,

    /// Directory the audio file is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let config = BenchConfig::from_env()?;
    let client = TtsClient::from_config(&config)?;
    let mut session = BenchSession::new(client, config.voice_cache_ttl);

    let outcome = match args.command {
        Command::Status => cmd_status(&session).await,
        Command::Models => {
            print_models(&session);
            Ok(())
        }
        Command::Voices { refresh } => cmd_voices(&mut session, refresh).await,
        Command::Settings { voice } => cmd_settings(&mut session, &voice).await,
        Command::Say(say) => cmd_say(&mut session, say).await,
        Command::Shell => run_shell(&mut session).await,
    };

    if let Some(hint) = outcome.as_ref().err().and_then(remediation) {
        eprintln!("{}", hint);
    }
    outcome
}

fn remediation(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<voice_bench::Error>()
        .and_then(|e| e.remediation())
}

async fn cmd_status<T: SpeechTransport>(session: &BenchSession<T>) -> Result<()> {
    match session.client().resolve_credential() {
        Ok(key) => println!("API key: {}", key.masked()),
        Err(_) => println!("API key: NOT_SET"),
    }
    println!("{}", session.status().await);
    Ok(())
}

fn print_models<T: SpeechTransport>(session: &BenchSession<T>) {
    for model in session.models() {
        println!("{:<24} {}", model.model_id, model.name);
    }
}

async fn cmd_voices<T: SpeechTransport>(
    session: &mut BenchSession<T>,
    refresh: bool,
) -> Result<()> {
    if refresh {
        session.refresh_voices();
    }
    let voices = session.voices().await?;
    if voices.is_empty() {
        println!("No voices available");
    }
    for voice in voices {
        println!("{:<24} {}", voice.voice_id, voice.name);
    }
    Ok(())
}

async fn cmd_settings<T: SpeechTransport>(
    session: &mut BenchSession<T>,
    voice: &str,
) -> Result<()> {
    let (voice_id, settings) = session.resolve_voice(voice).await?;
    println!("{}", voice_id);
    println!("  stability          {:.2}", settings.stability);
    println!("  similarity_boost   {:.2}", settings.similarity_boost);
    println!("  style              {:.2}", settings.style);
    println!("  use_speaker_boost  {}", settings.use_speaker_boost);
    Ok(())
}

async fn cmd_say<T: SpeechTransport>(session: &mut BenchSession<T>, say: SayArgs) -> Result<()> {
    let (voice_id, defaults) = match say.voice.as_deref() {
        Some(wanted) => session.resolve_voice(wanted).await?,
        None => {
            let voice = first_voice(session).await?;
            let defaults = session.settings_for(&voice.voice_id).await;
            (voice.voice_id, defaults)
        }
    };

    let mut controls = SynthesisControls::for_voice(voice_id, defaults)
        .with_text(say.text.unwrap_or_else(|| SAMPLE_TEXT.to_string()));
    controls.model_id = say.model;
    controls.output_format = say.format;
    controls.stability = say.stability.unwrap_or(controls.stability);
    controls.similarity_boost = say.similarity_boost.unwrap_or(controls.similarity_boost);
    controls.style = say.style.unwrap_or(controls.style);
    if say.no_speaker_boost {
        controls.use_speaker_boost = false;
    }
    controls.speed = say.speed;
    controls.seed = say.seed;
    controls.language_code = say.language;

    let result = session.generate(&controls).await?;
    print_result(result);
    let path = session.save_last(&say.out).await?;
    println!("Saved to {}", path.display());
    Ok(())
}

/// First voice of the cached listing, used when no voice was asked for.
async fn first_voice<T: SpeechTransport>(session: &mut BenchSession<T>) -> Result<Voice> {
    session
        .voices()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No voices available"))
}

fn print_result(result: &SynthesisResult) {
    println!("Speech generated successfully!");
    println!("Format: {} ({})", result.output_format, result.mime_type);
    println!("Size: {} bytes", result.len());
}

const SHELL_HELP: &str = r#"COMMANDS:
    status                  Check connectivity
    models                  List models
    voices [--refresh]      List voices (cached unless --refresh)
    refresh                 Reload voices on next use
    use <voice>             Select a voice and load its default settings
    text <words...>         Set the text to synthesize
    set <control> <value>   model, format, stability, similarity_boost, style,
                            speaker_boost, speed, seed, language
    show                    Print current controls
    say                     Generate speech with the current controls
    save [dir]              Write the last audio to disk
    help                    Show this help
    quit                    Leave the shell"#;

async fn run_shell<T: SpeechTransport>(session: &mut BenchSession<T>) -> Result<()> {
    println!("{}", session.status().await);
    let mut controls = match first_voice(session).await {
        Ok(voice) => {
            let defaults = session.settings_for(&voice.voice_id).await;
            println!("Voice: {} ({})", voice.name, voice.voice_id);
            SynthesisControls::for_voice(voice.voice_id, defaults)
        }
        Err(e) => {
            println!("{}", e);
            SynthesisControls::for_voice("", VoiceSettings::default())
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"bench> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let outcome: Result<()> = match cmd {
            "" => Ok(()),
            "quit" | "exit" => break,
            "help" => {
                println!("{}", SHELL_HELP);
                Ok(())
            }
            "status" => cmd_status(session).await,
            "models" => {
                print_models(session);
                Ok(())
            }
            "voices" => cmd_voices(session, rest == "--refresh").await,
            "refresh" => {
                session.refresh_voices();
                println!("Voice list will be reloaded");
                Ok(())
            }
            "use" => match session.resolve_voice(rest).await {
                Ok((voice_id, defaults)) => {
                    let text = std::mem::take(&mut controls.text);
                    println!("Voice: {}", voice_id);
                    controls = SynthesisControls::for_voice(voice_id, defaults).with_text(text);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            "text" => {
                controls.text = rest.to_string();
                Ok(())
            }
            "set" => apply_setting(&mut controls, rest),
            "show" => {
                println!("{:#?}", controls);
                Ok(())
            }
            "say" => session.generate(&controls).await.map(print_result).map_err(Into::into),
            "save" => {
                let dir = if rest.is_empty() { Path::new(".") } else { Path::new(rest) };
                session
                    .save_last(dir)
                    .await
                    .map(|p| println!("Saved to {}", p.display()))
                    .map_err(Into::into)
            }
            other => Err(anyhow::anyhow!("Unknown command: {other} (try 'help')")),
        };

        if let Err(e) = outcome {
            println!("{}", e);
            if let Some(hint) = remediation(&e) {
                println!("{}", hint);
            }
        }
    }
    Ok(())
}

fn apply_setting(controls: &mut SynthesisControls, args: &str) -> Result<()> {
    let (name, value) = args
        .split_once(' ')
        .map(|(n, v)| (n, v.trim()))
        .ok_or_else(|| anyhow::anyhow!("usage: set <control> <value>"))?;
    match name {
        "model" => controls.model_id = value.to_string(),
        "format" => controls.output_format = value.parse()?,
        "stability" => controls.stability = value.parse()?,
        "similarity_boost" => controls.similarity_boost = value.parse()?,
        "style" => controls.style = value.parse()?,
        "speaker_boost" => controls.use_speaker_boost = value.parse()?,
        "speed" => controls.speed = value.parse()?,
        "seed" => {
            controls.seed = match value {
                "none" | "" => None,
                v => Some(v.parse()?),
            }
        }
        "language" => controls.language_code = value.to_string(),
        other => anyhow::bail!("Unknown control: {other}"),
    }
    Ok(())
}

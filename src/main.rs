use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use subtitler::{
    create_router, AppState, Config, LocalFileRetriever, MediaRetriever, NatsRecognizerProvider,
    PipelineConfig, RecognizerProvider, SubtitlePipeline, SubtitleService, YtDlpRetriever,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "subtitler", about = "Generate SRT subtitles from a video's speech")]
struct Cli {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/subtitler")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve,
    /// Subtitle one video URL or local audio file
    Transcribe {
        source: String,
        /// Write SRT here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Subtitler v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    // Model lives for the whole process
    let provider = Arc::new(NatsRecognizerProvider::connect(&cfg.recognizer).await?);
    let pipeline = SubtitlePipeline::new(provider.clone(), PipelineConfig::from(&cfg));

    let result = match cli.command {
        Command::Serve => serve(&cfg, pipeline).await,
        Command::Transcribe { source, output } => transcribe(&cfg, pipeline, source, output).await,
    };

    provider.shutdown().await?;
    result
}

async fn serve(cfg: &Config, pipeline: SubtitlePipeline) -> Result<()> {
    let retriever = Arc::new(YtDlpRetriever::new(
        cfg.media.downloader.clone(),
        cfg.media.build_dir.clone(),
    ));
    let app = create_router(AppState::new(SubtitleService::new(retriever, pipeline)));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn transcribe(
    cfg: &Config,
    pipeline: SubtitlePipeline,
    source: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let retriever: Arc<dyn MediaRetriever> = if std::path::Path::new(&source).exists() {
        Arc::new(LocalFileRetriever)
    } else {
        Arc::new(YtDlpRetriever::new(
            cfg.media.downloader.clone(),
            cfg.media.build_dir.clone(),
        ))
    };

    let service = SubtitleService::new(retriever, pipeline);
    let subtitles = service.subtitles_for(Some(&source)).await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &subtitles.srt)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} cues to {}", subtitles.cues.len(), path.display());
        }
        None => print!("{}", subtitles.srt),
    }

    Ok(())
}

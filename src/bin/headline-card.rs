use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use headline_card::{
    Aspect, CardRenderer, OutputFormat, PromptRequest, RenderConfig, RenderRequest,
    TemplateLibrary, sha256_hex,
};

#[derive(Parser, Debug)]
#[command(name = "headline-card", version)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a headline card as PNG or JPEG.
    Render(RenderArgs),
    /// Prompt templates and style presets.
    #[command(subcommand)]
    Prompt(PromptCommand),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Caption text; `\n` in the value is kept as a line break.
    #[arg(long, conflicts_with = "caption_file")]
    caption: Option<String>,

    /// Read the caption from a UTF-8 file.
    #[arg(long)]
    caption_file: Option<PathBuf>,

    /// `1:1` (square) or `4:3` (portrait).
    #[arg(long, default_value = "1:1")]
    aspect: Aspect,

    /// Background image; undecodable files fall back to the solid color.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Caption font. Overrides the config file and the environment.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// `png` or `jpeg`. Defaults to the extension of `--out`, then PNG.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Also write the other aspect next to `--out`.
    #[arg(long)]
    both: bool,

    /// Print the SHA-256 of each written file.
    #[arg(long)]
    digest: bool,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum PromptCommand {
    /// List the `{{variables}}` of a template file.
    Vars {
        #[arg(long)]
        template: PathBuf,
    },
    /// Print a prompt built from a style, a template and the core content.
    Build(BuildArgs),
    /// List the built-in style presets.
    Styles,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Preset key or its English label (e.g. `Professional`).
    #[arg(long)]
    style: String,

    /// Template body from a file.
    #[arg(long, conflicts_with = "template_name", required_unless_present = "template_name")]
    template: Option<PathBuf>,

    /// Template from the library by name.
    #[arg(long)]
    template_name: Option<String>,

    /// Template library JSON; the built-in library is used when omitted.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Core content of the post.
    #[arg(long)]
    core: String,

    /// Variable value as `name=value`; repeatable.
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Prompt(cmd) => cmd_prompt(cmd),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty variable name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn load_config(args: &RenderArgs) -> anyhow::Result<RenderConfig> {
    let mut config = match &args.config {
        Some(p) => RenderConfig::from_path(p)?,
        None => RenderConfig::default(),
    }
    .apply_env();
    if let Some(font) = &args.font {
        config.font_path = font.clone();
    }
    Ok(config)
}

fn read_caption(args: &RenderArgs) -> anyhow::Result<String> {
    match (&args.caption, &args.caption_file) {
        (Some(text), _) => Ok(text.replace("\\n", "\n")),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read caption '{}'", path.display()))?;
            Ok(text.trim_end_matches(['\r', '\n']).to_string())
        }
        (None, None) => Ok(String::new()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let format = args
        .format
        .or_else(|| OutputFormat::from_path(&args.out))
        .unwrap_or_default()
        .with_quality(config.jpeg_quality);
    let renderer = CardRenderer::new(config)?;

    let mut request = RenderRequest::new(read_caption(&args)?, args.aspect);
    if let Some(path) = &args.background {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read background '{}'", path.display()))?;
        request = request.with_background(bytes);
    }

    if args.both {
        let (selected, other) = renderer.render_preview_pair(&request)?;
        write_output(&args.out, &selected.encode(format)?, args.digest)?;
        let other_path = sibling_path(&args.out, other.aspect, format);
        write_output(&other_path, &other.encode(format)?, args.digest)?;
    } else {
        let bytes = renderer.render_encoded(&request, format)?;
        write_output(&args.out, &bytes, args.digest)?;
    }
    Ok(())
}

/// `card.png` with aspect 4:3 becomes `card_image_4-3.png`; `:` is not valid in Windows paths.
fn sibling_path(out: &Path, aspect: Aspect, format: OutputFormat) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out.with_file_name(format!(
        "{stem}_image_{}.{}",
        aspect.ratio_label().replace(':', "-"),
        format.extension()
    ))
}

fn write_output(path: &Path, bytes: &[u8], digest: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write image '{}'", path.display()))?;
    if digest {
        eprintln!("wrote {} sha256={}", path.display(), sha256_hex(bytes));
    } else {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn read_template(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read template '{}'", path.display()))
}

fn cmd_prompt(cmd: PromptCommand) -> anyhow::Result<()> {
    match cmd {
        PromptCommand::Vars { template } => {
            for name in headline_card::extract_variables(&read_template(&template)?) {
                println!("{name}");
            }
        }
        PromptCommand::Styles => {
            for preset in headline_card::style_presets() {
                println!("{}\t{}", preset.key, preset.description);
            }
        }
        PromptCommand::Build(args) => {
            let template = match (&args.template, &args.template_name) {
                (Some(path), _) => read_template(path)?,
                (None, Some(name)) => {
                    let library = match &args.library {
                        Some(p) => TemplateLibrary::from_path(p)?,
                        None => TemplateLibrary::default(),
                    };
                    library
                        .get(name)
                        .with_context(|| format!("no template named '{name}'"))?
                        .to_string()
                }
                (None, None) => anyhow::bail!("one of --template or --template-name is required"),
            };
            if headline_card::find_style(&args.style).is_none() {
                tracing::warn!(style = %args.style, "unknown style; prompt gets no instruction prefix");
            }
            let request = PromptRequest {
                style: args.style,
                template,
                core_content: args.core,
                values: args.vars.into_iter().collect::<BTreeMap<_, _>>(),
            };
            print!("{}", headline_card::build_prompt(&request)?);
        }
    }
    Ok(())
}

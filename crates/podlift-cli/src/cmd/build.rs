//! Build command - the full pipeline.
//!
//! Resolver → Fetcher → Linker (one per architecture) → Assembler →
//! Packager. Control flow is linear; the per-architecture links run
//! concurrently but their outputs are merged in configured order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use reqwest::Client;

use podlift_core::{
    Arch, BuildWorkspace, PodSpec, ToolchainConfig, bundle, extract, fetch, filename_from_url,
    linker, lipo, podspec,
};

use crate::ui::Output;
use crate::ui::theme::format_size;

/// Everything `podlift build` accepts from the command line.
#[derive(Debug)]
pub struct BuildOptions {
    /// Pod name as published in the registry.
    pub pod: String,
    /// Property-list descriptor to install into the bundle.
    pub plist: PathBuf,
    /// Directory the final archive is written to.
    pub output_dir: PathBuf,
    /// Optional toolchain configuration file.
    pub config: Option<PathBuf>,
    /// Minimum OS version override.
    pub min_os: Option<String>,
    /// Architecture list override.
    pub archs: Vec<Arch>,
    /// Keep the workspace on disk after the run.
    pub keep_workspace: bool,
}

/// Run the full build pipeline for one pod.
pub async fn build(ui: &Output, opts: BuildOptions) -> Result<()> {
    let config = load_config(&opts)?;

    // Resolve ambient paths up front; everything downstream works on
    // absolute paths only.
    let plist = opts
        .plist
        .canonicalize()
        .with_context(|| format!("Metadata descriptor not found: {}", opts.plist.display()))?;
    let output_dir = opts
        .output_dir
        .canonicalize()
        .with_context(|| format!("Output directory not found: {}", opts.output_dir.display()))?;

    let spec = podspec::resolve(&opts.pod)
        .await
        .with_context(|| format!("Failed to resolve podspec for {}", opts.pod))?;

    let workspace = BuildWorkspace::create().context("Failed to create build workspace")?;

    let result = run_pipeline(ui, &spec, &config, &plist, &output_dir, &workspace).await;

    if opts.keep_workspace {
        let kept = workspace.keep();
        ui.info(&format!("workspace kept at {}", kept.display()));
    }

    let artifact = result?;
    ui.success(&format!("File {} created", artifact.display()));
    Ok(())
}

fn load_config(opts: &BuildOptions) -> Result<ToolchainConfig> {
    let mut config = match &opts.config {
        Some(path) => ToolchainConfig::from_file(path)
            .with_context(|| format!("Failed to load toolchain config {}", path.display()))?,
        None => ToolchainConfig::default(),
    };
    if let Some(min_os) = &opts.min_os {
        config.min_os_version.clone_from(min_os);
    }
    if !opts.archs.is_empty() {
        config.archs.clone_from(&opts.archs);
    }
    Ok(config)
}

async fn run_pipeline(
    ui: &Output,
    spec: &PodSpec,
    config: &ToolchainConfig,
    plist: &Path,
    output_dir: &Path,
    workspace: &BuildWorkspace,
) -> Result<PathBuf> {
    let archive_name = filename_from_url(&spec.archive_url);
    ensure!(
        !archive_name.is_empty(),
        "cannot derive archive name from {}",
        spec.archive_url
    );

    ui.step("Downloading source archive");
    let client = Client::new();
    let archive_path = workspace.download_path(archive_name);
    let bytes = fetch::download(&client, &spec.archive_url, &archive_path)
        .await
        .with_context(|| format!("Failed to download {}", spec.archive_url))?;
    ui.info(&format!("{} downloaded", format_size(bytes)));

    ui.step(&format!("Extracting {archive_name}"));
    let content_dir = workspace.content_dir();
    let files = extract::extract_tar_gz(&archive_path, &content_dir)
        .with_context(|| format!("Failed to extract {archive_name}"))?;
    ui.info(&format!("{} files extracted", files.len()));

    let static_archive = workspace.binary_slot(&spec.name);
    ensure!(
        static_archive.is_file(),
        "framework binary not found in archive: {}",
        static_archive.display()
    );

    let request = linker::LinkRequest {
        static_archive: &static_archive,
        frameworks: &spec.frameworks,
        libraries: &spec.libraries,
        config,
    };

    // The links are independent; run them concurrently but collect
    // outputs in configured order so the merge is deterministic.
    let mut jobs = Vec::with_capacity(config.archs.len());
    for &arch in &config.archs {
        let out = workspace.linked_output(&spec.name, arch);
        let args = linker::libtool_args(arch, &request, &out)?;
        ui.step(&format!("Linking for {} {}", arch.platform(), arch));
        ui.command("libtool", &args);
        jobs.push(async move { linker::run_libtool(arch, &args).await.map(|()| out) });
    }
    let dylibs: Vec<PathBuf> = futures::future::try_join_all(jobs)
        .await
        .context("Linking failed")?;

    ui.step("Creating universal dynamic library");
    let merged = workspace.merged_output(&spec.name);
    let lipo_args = lipo::lipo_args(&merged, &dylibs, config.archs.len())?;
    ui.command("lipo", &lipo_args);
    lipo::run_lipo(&lipo_args)
        .await
        .context("Failed to merge architectures")?;

    ui.step("Copying Info.plist");
    bundle::install_plist(plist, &workspace.framework_dir(&spec.name))
        .context("Failed to install Info.plist")?;

    ui.step("Replacing binary and creating tar.gz");
    bundle::replace_binary(&merged, &static_archive)
        .context("Failed to replace framework binary")?;

    let dest = output_dir.join(archive_name);
    bundle::create_archive(&content_dir, &dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    Ok(dest)
}

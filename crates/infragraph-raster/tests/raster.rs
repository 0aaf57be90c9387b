use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use infragraph_core::{
    CommandOutput, CommandRequest, CommandRunner, GraphBuilder, Reporter, ResourceKind,
    ResourceNode,
};
use infragraph_dot::DotRenderer;
use infragraph_error::{ErrorKind, Result};
use infragraph_raster::{DiagramReporter, PngInfo, RasterRenderer};

fn minimal_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

/// In-memory stand-in for the layout engine.
enum FakeEngine {
    WritePng { width: u32, height: u32 },
    ExitError { status: i32, stderr: &'static str },
    WriteGarbage,
}

impl FakeEngine {
    fn output_path(request: &CommandRequest) -> PathBuf {
        let pos = request
            .args
            .iter()
            .position(|a| a == "-o")
            .expect("engine invoked without -o");
        PathBuf::from(&request.args[pos + 1])
    }
}

impl CommandRunner for FakeEngine {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        match self {
            FakeEngine::WritePng { width, height } => {
                fs::write(Self::output_path(request), minimal_png(*width, *height)).unwrap();
                Ok(CommandOutput {
                    status: 0,
                    stdout: Vec::new(),
                    stderr: String::new(),
                })
            }
            FakeEngine::ExitError { status, stderr } => Ok(CommandOutput {
                status: *status,
                stdout: Vec::new(),
                stderr: (*stderr).to_string(),
            }),
            FakeEngine::WriteGarbage => {
                fs::write(Self::output_path(request), b"not a png").unwrap();
                Ok(CommandOutput {
                    status: 0,
                    stdout: Vec::new(),
                    stderr: String::new(),
                })
            }
        }
    }
}

fn write_dot(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("app.dot");
    fs::write(&path, "digraph \"app\" {\n}\n").unwrap();
    path
}

#[test]
fn rasterize_produces_png_with_nonzero_dimensions() {
    let tmp = tempfile::tempdir().unwrap();
    let dot_path = write_dot(tmp.path());

    let renderer = RasterRenderer::with_runner(Arc::new(FakeEngine::WritePng {
        width: 320,
        height: 240,
    }));
    let artifact = renderer.rasterize(&dot_path, tmp.path()).unwrap();

    assert!(artifact.filepath().ends_with("app.png"));
    let bytes = fs::read(artifact.filepath()).unwrap();
    let info = PngInfo::probe(&bytes).unwrap();
    assert_eq!((info.width, info.height), (320, 240));
}

#[test]
fn engine_failure_surfaces_stderr_and_leaves_no_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dot_path = write_dot(tmp.path());

    let renderer = RasterRenderer::with_runner(Arc::new(FakeEngine::ExitError {
        status: 1,
        stderr: "syntax error in line 1",
    }));
    let err = renderer.rasterize(&dot_path, tmp.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RasterFailed);
    let context = format!("{err}");
    assert!(context.contains("syntax error in line 1"));
    assert!(!tmp.path().join("app.png").exists());
}

#[test]
fn garbage_output_is_rejected_and_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let dot_path = write_dot(tmp.path());

    let renderer = RasterRenderer::with_runner(Arc::new(FakeEngine::WriteGarbage));
    let err = renderer.rasterize(&dot_path, tmp.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RasterFailed);
    assert!(!tmp.path().join("app.png").exists());
}

#[test]
fn missing_engine_maps_to_raster_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let dot_path = write_dot(tmp.path());

    let renderer = RasterRenderer::new().with_engine("infragraph-no-such-engine");
    let err = renderer.rasterize(&dot_path, tmp.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RasterFailed);
}

#[test]
fn diagram_reporter_sets_both_default_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let mut b = GraphBuilder::new("app");
    b.add_node(ResourceNode::new("api", "orders-api", ResourceKind::Api))
        .unwrap();
    let graph = b.build();

    let reporter = DiagramReporter::new(DotRenderer::new()).with_raster(
        RasterRenderer::with_runner(Arc::new(FakeEngine::WritePng {
            width: 100,
            height: 80,
        })),
    );
    let artifacts = reporter.report(&graph, tmp.path()).unwrap();

    let dot = artifacts.default_dot().expect("dot artifact");
    let png = artifacts.default_png().expect("png artifact");
    assert!(dot.filepath().ends_with("app.dot"));
    assert!(png.filepath().ends_with("app.png"));
    assert_eq!(artifacts.len(), 2);
}

#[test]
fn diagram_reporter_without_raster_emits_dot_only() {
    let tmp = tempfile::tempdir().unwrap();
    let graph = GraphBuilder::new("app").build();

    let reporter = DiagramReporter::new(DotRenderer::new());
    let artifacts = reporter.report(&graph, tmp.path()).unwrap();

    assert!(artifacts.default_dot().is_some());
    assert!(artifacts.default_png().is_none());
}

use basicgl_common::{
    compile_shaders, CompileOptions, DataSource, ReadFailurePolicy, ShaderCompiler,
};
use clap::Parser;
use glow::HasContext;
use renderers::PreviewQuad;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};
use shader::GlBackend;
use std::path::PathBuf;
use vek::Vec2;

pub mod renderers;
pub mod shader;

/// Compile a vertex/fragment shader pair and preview it on a full-screen quad.
#[derive(Parser, Debug)]
struct Args {
    /// Vertex shader source
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/preview.vert"))]
    vertex: PathBuf,

    /// Fragment shader source
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/preview.frag"))]
    fragment: PathBuf,

    /// Exit with an error instead of previewing a program that did not build
    #[arg(long)]
    strict: bool,

    /// Don't submit a stage to the driver if its file could not be read
    #[arg(long)]
    abort_on_read_failure: bool,

    /// Render this many frames, then exit
    #[arg(long)]
    frames: Option<u32>,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("SDL: {0}")]
    Sdl(String),

    #[error("GL: {0}")]
    Gl(String),

    #[error(transparent)]
    Shader(#[from] basicgl_common::Error),

    #[error("no shader program was created")]
    NoProgram,
}

unsafe fn load_program(gl: &glow::Context, args: &Args) -> Result<glow::Program, RunError> {
    let backend = GlBackend::new(gl);

    if !args.strict && !args.abort_on_read_failure {
        return compile_shaders(&backend, &args.vertex, &args.fragment)
            .ok_or(RunError::NoProgram);
    }

    let on_read_failure = if args.abort_on_read_failure {
        ReadFailurePolicy::Abort
    } else {
        ReadFailurePolicy::Submit
    };
    let outcome = ShaderCompiler::new(&backend)
        .with_options(CompileOptions { on_read_failure })
        .compile(
            DataSource::Path(&args.vertex),
            DataSource::Path(&args.fragment),
        );

    if args.strict {
        Ok(outcome.into_program_or_delete(&backend)?)
    } else {
        outcome.program.ok_or(RunError::NoProgram)
    }
}

unsafe fn run(args: &Args) -> Result<(), RunError> {
    let sdl = sdl2::init().map_err(RunError::Sdl)?;
    let video = sdl.video().map_err(RunError::Sdl)?;
    let gl_attr = video.gl_attr();
    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_version(3, 3);
    let window = video
        .window("BasicGL", args.width, args.height)
        .opengl()
        .resizable()
        .build()
        .map_err(|err| RunError::Sdl(err.to_string()))?;
    let window_gl_context = window.gl_create_context().map_err(RunError::Sdl)?;
    window
        .gl_make_current(&window_gl_context)
        .map_err(RunError::Sdl)?;
    window
        .subsystem()
        .gl_set_swap_interval(1)
        .map_err(RunError::Sdl)?;

    let mut gl = glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _);
    let mut event_pump = sdl.event_pump().map_err(RunError::Sdl)?;

    gl.enable(glow::DEBUG_OUTPUT);
    gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
    gl.debug_message_callback(|_source, _ty, _id, _severity, message| {
        log::debug!("GL: {}", message)
    });
    gl.debug_message_control(
        glow::DONT_CARE,
        glow::DONT_CARE,
        glow::DEBUG_SEVERITY_NOTIFICATION,
        &[],
        false,
    );
    gl.clear_color(0.1, 0.2, 0.3, 1.0);

    log::info!(
        "Compiling {} + {}",
        args.vertex.display(),
        args.fragment.display()
    );
    let program = load_program(&gl, args)?;
    let quad = PreviewQuad::new(&gl).map_err(RunError::Gl)?;

    let timer = sdl.timer().map_err(RunError::Sdl)?;
    let start = timer.ticks();
    let mut frame = 0;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = window.drawable_size();
                    gl.viewport(0, 0, width as _, height as _);
                }
                _ => {}
            }
        }

        let (width, height) = window.drawable_size();
        let time = (timer.ticks() - start) as f32 / 1000.0;

        gl.clear(glow::COLOR_BUFFER_BIT);
        quad.draw(
            &gl,
            program,
            time,
            Vec2::new(width as f32, height as f32),
        );
        window.gl_swap_window();

        frame += 1;
        if args.frames.is_some_and(|frames| frame >= frames) {
            break;
        }
    }

    log::info!("Rendered {} frame(s)", frame);
    quad.destroy(&gl);
    gl.delete_program(program);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = unsafe { run(&args) } {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

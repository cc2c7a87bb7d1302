mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use sidescroller::compute::{apply_command, init_world, tick};
use sidescroller::entities::{Command, GameStatus, SoundCue, World};
use sidescroller::persist::{default_save_path, load_save, write_save, SaveState};

const FRAME: Duration = Duration::from_millis(33); // ≈30 ticks/second

// ── Input decoding ────────────────────────────────────────────────────────────

/// Map a key press to one of the five logical commands. WASD and the
/// arrow keys are interchangeable.
fn key_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Right),
        KeyCode::Char(' ') => Some(Command::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Audio shim ────────────────────────────────────────────────────────────────

/// Terminal stand-in for the audio collaborator: one bell per drained cue.
fn play_sounds<W: Write>(out: &mut W, cues: &[SoundCue]) -> std::io::Result<()> {
    for cue in cues {
        log::debug!("sound cue: {:?}", cue);
        out.write_all(b"\x07")?;
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run until the player quits or the world reaches game over. Each frame
/// drains all pending key presses, applies them as commands, advances one
/// tick, plays the queued cues, and renders.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            if kind != KeyEventKind::Press {
                continue;
            }
            if is_quit(code, modifiers) {
                return Ok(());
            }
            if let Some(cmd) = key_command(code) {
                *world = apply_command(world, cmd);
            }
        }

        *world = tick(world, &mut rng);

        let cues = world.drain_sounds();
        play_sounds(out, &cues)?;
        display::render(out, world)?;

        if world.status == GameStatus::GameOver {
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// Block until any key is pressed, so the game-over overlay stays visible.
fn wait_for_key(rx: &mpsc::Receiver<Event>) {
    while let Ok(ev) = rx.recv() {
        if matches!(
            ev,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            })
        ) {
            break;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let save_path = default_save_path();
    let save = load_save(&save_path);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Sidescrolling Shooter"))?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut world = init_world(&save, &mut thread_rng());
    let result = game_loop(&mut out, &mut world, &rx);

    // Persist on both exit paths: quit and game over.
    let final_save = SaveState {
        score: world.player.score,
        kills: world.player.kills,
    };
    if let Err(err) = write_save(&save_path, &final_save) {
        log::error!("could not write save {}: {}", save_path.display(), err);
    }

    if result.is_ok() && world.status == GameStatus::GameOver {
        wait_for_key(&rx);
    }

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

use anyhow::{Context, Result, bail};
use tracing::info;

use arbiter_core::Position;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("arbiter starting");

    let mut args = std::env::args().skip(1).peekable();
    let mut position = if args.peek().map(String::as_str) == Some("--fen") {
        args.next();
        let Some(fen) = args.next() else {
            bail!("--fen needs a position argument");
        };
        fen.parse::<Position>()
            .with_context(|| format!("failed to load position {fen:?}"))?
    } else {
        Position::starting_position()
    };

    for san in args {
        let halfmove = position.halfmove_number();
        position
            .make_move(&san)
            .with_context(|| format!("move {halfmove} ({san}) rejected in {position}"))?;
        info!(halfmove, san = %san, "move applied");
    }

    println!("{position}");
    println!("{}", position.preview());
    println!("legal moves: {}", position.legal_moves().join(" "));

    let status = if position.is_mate()? {
        "checkmate"
    } else if position.is_stalemate()? {
        "stalemate"
    } else if position.is_fifty_move_draw() {
        "fifty-move draw"
    } else if position.is_check()? {
        "check"
    } else {
        "in progress"
    };
    println!("status: {status}");
    Ok(())
}

//! Perft (performance test) for move generation correctness verification.

use crate::position::Position;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without descending further.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let successors = position.successors();

    if depth == 1 {
        return successors.len() as u64;
    }

    successors
        .iter()
        .map(|(_, child)| perft(child, depth - 1))
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(san, node_count)` pairs sorted by move text.
pub fn divide(position: &Position, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = position
        .successors()
        .iter()
        .map(|(mv, child)| {
            let count = if depth <= 1 { 1 } else { perft(child, depth - 1) };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    // --- Position 1: Starting position ---

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Position::starting_position(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Position::starting_position(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Position::starting_position(), 3), 8_902);
    }

    #[test]
    #[ignore] // slow
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Position::starting_position(), 4), 197_281);
    }

    // --- Position 2: Kiwipete ---

    fn kiwipete() -> Position {
        position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&kiwipete(), 2), 2_039);
    }

    #[test]
    #[ignore] // slow
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&kiwipete(), 3), 97_862);
    }

    // --- Position 3: en passant pins along a rank ---

    fn position3() -> Position {
        position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&position3(), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&position3(), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&position3(), 3), 2_812);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos3_depth_4() {
        assert_eq!(perft(&position3(), 4), 43_238);
    }

    // --- Position 4: promotions and castling under fire ---

    fn position4() -> Position {
        position("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
    }

    #[test]
    fn perft_pos4_depth_1() {
        assert_eq!(perft(&position4(), 1), 6);
    }

    #[test]
    fn perft_pos4_depth_2() {
        assert_eq!(perft(&position4(), 2), 264);
    }

    #[test]
    fn perft_pos4_depth_3() {
        assert_eq!(perft(&position4(), 3), 9_467);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos4_depth_4() {
        assert_eq!(perft(&position4(), 4), 422_333);
    }

    // --- Position 5 ---

    fn position5() -> Position {
        position("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8")
    }

    #[test]
    fn perft_pos5_depth_1() {
        assert_eq!(perft(&position5(), 1), 44);
    }

    #[test]
    fn perft_pos5_depth_2() {
        assert_eq!(perft(&position5(), 2), 1_486);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos5_depth_3() {
        assert_eq!(perft(&position5(), 3), 62_379);
    }

    // --- Chess960 with Shredder castling ---

    fn chess960() -> Position {
        position("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9")
    }

    #[test]
    fn perft_chess960_depth_1() {
        assert_eq!(perft(&chess960(), 1), 21);
    }

    #[test]
    fn perft_chess960_depth_2() {
        assert_eq!(perft(&chess960(), 2), 528);
    }

    #[test]
    #[ignore] // slow
    fn perft_chess960_depth_3() {
        assert_eq!(perft(&chess960(), 3), 12_189);
    }

    // --- divide test ---

    #[test]
    fn divide_startpos_depth_1() {
        let results = divide(&Position::starting_position(), 1);
        assert_eq!(results.len(), 20);
        for (_, count) in &results {
            assert_eq!(*count, 1);
        }
        assert_eq!(results[0].0, "Na3");
    }

    #[test]
    fn divide_sums_to_perft() {
        let results = divide(&kiwipete(), 2);
        let total: u64 = results.iter().map(|(_, count)| count).sum();
        assert_eq!(total, 2_039);
    }

    // --- depth 0 ---

    #[test]
    fn perft_depth_0() {
        assert_eq!(perft(&Position::starting_position(), 0), 1);
    }
}

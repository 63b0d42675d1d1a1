use shatranj::{perft, Fen, Position};

fn perft_fen(fen: &str, depth: u32, expected: u64) {
    let mut position = fen.parse::<Fen>().expect("valid fen").into_position();
    let before = position.clone();
    assert_eq!(perft(&mut position, depth), expected, "{fen} at depth {depth}");
    // Making and unmaking moves must leave no trace.
    assert_eq!(position, before, "{fen} mutated by perft");
}

#[test]
fn starting_position() {
    let mut position = Position::new();
    assert_eq!(perft(&mut position, 1), 20);
    assert_eq!(perft(&mut position, 2), 400);
    assert_eq!(perft(&mut position, 3), 8902);
    assert_eq!(perft(&mut position, 4), 197_281);
}

#[test]
fn kiwipete() {
    perft_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        1,
        48,
    );
    perft_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        2,
        2039,
    );
    perft_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
        97_862,
    );
}

#[test]
fn endgame_with_en_passant_pins() {
    perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 1, 14);
    perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 2, 191);
    perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3, 2812);
    perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4, 43_238);
}

#[test]
fn promotions_and_underpromotions() {
    perft_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        1,
        6,
    );
    perft_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        2,
        264,
    );
    perft_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        3,
        9467,
    );
}

#[test]
fn talkchess_position() {
    perft_fen(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        1,
        44,
    );
    perft_fen(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        2,
        1486,
    );
    perft_fen(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        3,
        62_379,
    );
}

#[test]
fn symmetrical_middlegame() {
    perft_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        1,
        46,
    );
    perft_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        2,
        2079,
    );
    perft_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        3,
        89_890,
    );
}

// Larger node counts, off by default to keep the suite fast.
#[test]
#[ignore]
fn deep_counts() {
    let mut position = Position::new();
    assert_eq!(perft(&mut position, 5), 4_865_609);
    perft_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        4,
        4_085_603,
    );
}

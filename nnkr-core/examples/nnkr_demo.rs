//! Prints one normal and one advanced problem, then grades a discard.
//!
//! Run with an optional chat id: `cargo run --example nnkr_demo -- 42`

use nnkr_core::config::{Difficulty, GeneratorConfig};
use nnkr_core::discard::check_discard;
use nnkr_core::generator::ProblemGenerator;
use nnkr_core::improvement::ukeire_count;
use nnkr_core::seeding::ChatRng;
use nnkr_core::tile::hand_to_unicode;

fn main() -> anyhow::Result<()> {
    let chat_id: i64 = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(1);

    let config = GeneratorConfig::from_env();
    let rule = config.shanten_rule;
    let generator = ProblemGenerator::new(config);
    let mut chat = ChatRng::new([7u8; 32], chat_id);

    let problem = generator.generate_for(Difficulty::Normal, &mut chat.next_rng())?;
    let hand = problem.to_hand()?;
    println!("Normal problem #{}", chat.nonce());
    println!("  {}  ({})", hand_to_unicode(&problem.hand), hand);
    println!("  shanten {}, {} melds", problem.shanten, problem.meld_count);

    let analysis = problem.analyze(rule)?;
    for c in &analysis.candidates {
        let tiles: Vec<String> = c.improvements.iter().map(|t| t.to_string()).collect();
        let rest = hand.without(c.discard).unwrap_or(hand);
        println!(
            "  cut {:<3} -> shanten {}, {} kinds / {} tiles: {}",
            c.discard.to_string(),
            c.shanten,
            c.improvements.len(),
            ukeire_count(&rest, &c.improvements),
            tiles.join(" ")
        );
    }

    let guess = problem.hand[0];
    println!(
        "  guessing {} ... {}",
        guess,
        if check_discard(&hand, guess) { "correct" } else { "wrong" }
    );

    let advanced = generator.generate_advanced_for(Difficulty::Advanced, &mut chat.next_rng())?;
    println!("\nAdvanced problem #{}", chat.nonce());
    println!("  {}", hand_to_unicode(&advanced.problem.hand));
    println!(
        "  round {} seat {} turn {} dora {}",
        advanced.round_wind,
        advanced.seat_wind,
        advanced.turn,
        hand_to_unicode(&advanced.dora_tiles)
    );
    for (c, w) in advanced.candidates.iter().zip(&advanced.weights) {
        println!("  cut {:<3} weight {:.3}", c.discard.to_string(), w);
    }
    println!("{}", serde_json::to_string_pretty(&advanced)?);
    Ok(())
}

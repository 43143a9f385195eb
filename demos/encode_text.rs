use huffcode::{huffman, CodeStats, Config, FrequencyMap};

fn main() -> huffcode::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let s = String::from("Hello my name is Sam!");
    let tree = huffman(s.chars(), &Config::new())?;
    println!("{tree}");

    let (e, d) = tree.into_encoder_decoder_pair()?;
    let stats = CodeStats::new(&FrequencyMap::count(s.chars()), e.codes())?;
    println!("{stats:?}");

    let out = e.encode(s.chars())?;
    let dec: String = d.decode(&out)?.into_iter().collect();

    println!("{dec:?}");
    Ok(())
}

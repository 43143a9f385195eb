use huffcode::{huffman, CodeTree, Config, Decoder, EmptyInput, PackedBits};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::info;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Everything needed to restore the input: the packed stream and the tree.
#[derive(Serialize, Deserialize)]
struct HuffmanSerialized {
    data: PackedBits,
    tree: CodeTree<u8>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let fp = env::args()
        .nth(1)
        .ok_or("Please provide path to input file as first argument.")?;

    let input_bytes = fs::read(&fp)?;
    let config = Config::new().with_empty_input(EmptyInput::Reject);

    // encode scope - save to file
    {
        let tree = huffman(input_bytes.iter().copied(), &config)?;
        let (e, _) = tree.clone().into_encoder_decoder_pair()?;

        let encoded = e.encode(input_bytes.iter().copied())?;
        let packed = HuffmanSerialized {
            data: encoded.into(),
            tree,
        };
        let data = rmp_serde::to_vec(&packed)?;

        info!(input = input_bytes.len(), output = data.len(), "compressed {fp}");
        fs::write("encoded.mp", data)?;
    }

    // decode scope - read from file
    {
        let file_data = fs::read("encoded.mp")?;

        let packed: HuffmanSerialized = rmp_serde::from_slice(&file_data)?;
        let d = Decoder::new(packed.tree)?;
        let decoded = d.decode(&packed.data.into_bits()?)?;

        info!(matches = decoded == input_bytes, "decompressed encoded.mp");
        fs::write("decoded.txt", decoded)?;
    }

    Ok(())
}

use anyhow::Result;

fn main() -> Result<()> {
    pdfnum::run()?;
    Ok(())
}

use std::io::{BufRead, Write};

use mot_core::{DecodeError, DecodeOutcome, Decoder, FrameBuilder};
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, Envelope};
use crate::payload::PayloadFormat;
use crate::record::UplinkRecord;

/// Turns payload text into decoder output documents.
#[derive(Debug, Clone, Copy)]
pub struct UplinkProcessor {
    decoder: Decoder,
    format: PayloadFormat,
    envelope: Envelope,
    pretty: bool,
}

impl UplinkProcessor {
    pub fn new(decoder: Decoder, format: PayloadFormat, envelope: Envelope) -> Self {
        Self {
            decoder,
            format,
            envelope,
            pretty: false,
        }
    }

    pub fn from_config(config: &Config) -> color_eyre::Result<Self> {
        let decoder = Decoder::new(config.decoder_config()?);
        Ok(Self::new(decoder, config.input.format, config.output.envelope)
            .pretty(config.output.pretty))
    }

    /// Pretty-print emitted JSON documents.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parse and decode one payload. Returns the parsed bytes (empty when
    /// the text could not be parsed) alongside the outcome.
    #[instrument(name = "uplink", skip_all, fields(format = ?self.format))]
    pub fn process(&self, input: &str) -> (Vec<u8>, DecodeOutcome) {
        let bytes = match self.format.parse(input) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to parse payload");
                return (Vec::new(), DecodeOutcome::rejected(e.to_string()));
            }
        };

        let result = self.decoder.decode(&bytes);
        match &result {
            Ok(reading) => debug!(
                packet_counter = reading.packet_counter,
                end_orig = reading.end_orig,
                end_dest = reading.end_dest,
                "Decoded uplink"
            ),
            Err(DecodeError::FrameTooShort { expected, actual }) => {
                warn!(expected, actual_len = actual, "Rejected uplink");
            }
        }

        (bytes, result.into())
    }

    /// Process one payload and render it in the configured envelope.
    pub fn render(&self, input: &str) -> serde_json::Result<serde_json::Value> {
        let (bytes, outcome) = self.process(input);
        match self.envelope {
            Envelope::Outcome => serde_json::to_value(outcome),
            Envelope::Record => serde_json::to_value(UplinkRecord::new(&bytes, outcome)),
        }
    }

    /// Write one JSON document per payload to `out`, each followed by a
    /// newline. Rejected frames are output, not failures.
    pub fn decode_payloads<'a, I, W>(
        &self,
        payloads: I,
        mut out: W,
    ) -> color_eyre::Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        let mut count = 0usize;
        for payload in payloads {
            self.emit(payload, &mut out)?;
            count += 1;
        }
        out.flush()?;

        info!(count, "Decoded payloads");
        Ok(count)
    }

    /// Like [`UplinkProcessor::decode_payloads`], reading one payload per
    /// line as it arrives. Blank lines are skipped.
    pub fn decode_lines<R, W>(&self, input: R, mut out: W) -> color_eyre::Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut count = 0usize;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            self.emit(&line, &mut out)?;
            out.flush()?;
            count += 1;
        }

        info!(count, "Decoded payloads");
        Ok(count)
    }

    fn emit<W: Write>(&self, payload: &str, out: &mut W) -> color_eyre::Result<()> {
        let document = self.render(payload)?;
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &document)?;
        } else {
            serde_json::to_writer(&mut *out, &document)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Build a frame and render it as payload text.
pub fn encode(builder: &FrameBuilder, format: PayloadFormat) -> String {
    format.render(&builder.build())
}

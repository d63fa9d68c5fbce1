//! End-to-end `generate()` round trips against the worked scenarios in
//! `spec.md` §8.

use aprs_core::config::OutputFormat;
use aprs_core::{generate, TransmitRequest};

fn request(info: &[u8], path: &str, preamble: u8, trailer: u8) -> TransmitRequest {
    let mut req = TransmitRequest::new("N0CALL", info.to_vec());
    req.digi_path = path.to_string();
    req.config.preamble_flags = preamble;
    req.config.trailer_flags = trailer;
    req
}

#[test]
fn smoke_frame_scenario_produces_consistent_stage_counts() {
    // Scenario 1: "N0CALL" -> "APRS", no digis, info "Hello".
    let req = request(b"Hello", "", 1, 1);
    let mut sink: Vec<u8> = Vec::new();
    let report = generate(&req, &mut sink).unwrap();

    assert_eq!(report.frame_bytes, 23);
    assert_eq!(report.stuffed_bits % 8, 0, "flag-bounded body stays byte-aligned absent stuffing insertions changing total parity unexpectedly");
    assert!(report.audio_samples > 0);
    assert_eq!(sink.len(), report.output_bytes);
}

#[test]
fn digi_path_scenario_round_trips_through_the_full_pipeline() {
    // Scenario 2: digi path "WIDE1-1,WIDE2-1".
    let req = request(b"", "WIDE1-1,WIDE2-1", 1, 1);
    let mut sink: Vec<u8> = Vec::new();
    let report = generate(&req, &mut sink).unwrap();

    // dest(7)+src(7)+2 digi hops(14)+control(1)+pid(1)+info(0)+fcs(2) = 32.
    assert_eq!(report.frame_bytes, 32);
    assert_eq!(sink.len(), report.output_bytes);
}

#[test]
fn sample_rate_count_scenario_matches_spec_arithmetic() {
    // Scenario 5 arithmetic (§8): stuffed_bits * 40 audio samples, * 50
    // baseband samples, * 2 IQ_S8 bytes. We don't force an exact 32-byte
    // frame here (stuffing makes the bit count payload-dependent), but the
    // *ratios* the scenario specifies must hold for any frame.
    let req = request(&[0u8; 10], "", 1, 1);
    let mut sink: Vec<u8> = Vec::new();
    let report = generate(&req, &mut sink).unwrap();

    assert_eq!(report.audio_samples, report.stuffed_bits * 40);
    assert_eq!(report.output_samples, report.audio_samples * 50);
    assert_eq!(report.output_bytes, report.output_samples * 2);
}

#[test]
fn pcm_output_scenario_matches_spec_byte_count() {
    // Scenario 6: PCM_F32 output is stuffed_bits * 40 * 4 bytes.
    let mut req = request(b"Hello", "", 1, 1);
    req.config.output_format = OutputFormat::PcmF32;
    let mut sink: Vec<u8> = Vec::new();
    let report = generate(&req, &mut sink).unwrap();

    assert_eq!(sink.len(), report.stuffed_bits * 40 * 4);
}

#[test]
fn iq_f32_output_is_twice_the_iq_s8_byte_count() {
    let req_s8 = request(b"Hello", "", 1, 1);
    let mut sink_s8: Vec<u8> = Vec::new();
    let report_s8 = generate(&req_s8, &mut sink_s8).unwrap();

    let mut req_f32 = req_s8.clone();
    req_f32.config.output_format = OutputFormat::IqF32;
    let mut sink_f32: Vec<u8> = Vec::new();
    let report_f32 = generate(&req_f32, &mut sink_f32).unwrap();

    assert_eq!(report_s8.output_samples, report_f32.output_samples);
    assert_eq!(sink_f32.len(), sink_s8.len() * 4);
}

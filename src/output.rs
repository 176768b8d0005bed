//! Results output formatting (CSV).

use crate::analysis::classify::{SequenceKind, SpectrumClass};
use crate::analysis::{ComponentData, Metrics, Phasor, PhasorData, PointBreakdown, SignalData};
use crate::error::Result;
use crate::model::{normalize_phase, Harmonic};
use std::io::Write;

/// Write a synthesized window as CSV.
///
/// Format (three-phase; single-phase drops the b, c and n columns):
/// ```csv
/// t,ia,ib,ic,in
/// 0,0,-86.6,86.6,0
/// ```
pub fn write_signal_csv<W: Write>(signal: &SignalData, writer: &mut W) -> Result<()> {
    let three_phase = signal.is_three_phase();
    if three_phase {
        writeln!(writer, "t,ia,ib,ic,in")?;
    } else {
        writeln!(writer, "t,ia")?;
    }
    for (i, t) in signal.t.iter().enumerate() {
        if three_phase {
            writeln!(
                writer,
                "{},{},{},{},{}",
                t, signal.ia[i], signal.ib[i], signal.ic[i], signal.in_[i]
            )?;
        } else {
            writeln!(writer, "{},{}", t, signal.ia[i])?;
        }
    }
    Ok(())
}

/// Write the per-harmonic phase-a waveforms as CSV, one column per enabled
/// order followed by their sum.
///
/// Format:
/// ```csv
/// t,k1,k3,sum
/// 0,0,0,0
/// ```
pub fn write_components_csv<W: Write>(data: &ComponentData, writer: &mut W) -> Result<()> {
    write!(writer, "t")?;
    for c in &data.components {
        write!(writer, ",k{}", c.order)?;
    }
    writeln!(writer, ",sum")?;

    for (i, t) in data.t.iter().enumerate() {
        write!(writer, "{}", t)?;
        for c in &data.components {
            write!(writer, ",{}", c.samples[i])?;
        }
        writeln!(writer, ",{}", data.sum[i])?;
    }
    Ok(())
}

/// Write the instantaneous per-harmonic breakdown as CSV.
///
/// Format:
/// ```csv
/// k,Value
/// 1,58.7
/// sum,61.2
/// ```
pub fn write_point_csv<W: Write>(point: &PointBreakdown, writer: &mut W) -> Result<()> {
    writeln!(writer, "k,Value")?;
    for (k, v) in &point.values {
        writeln!(writer, "{},{}", k, v)?;
    }
    writeln!(writer, "sum,{}", point.sum)?;
    Ok(())
}

/// Write per-conductor metrics as CSV.
///
/// Format:
/// ```csv
/// Phase,THD_percent,RMS,Peak
/// a,60,82.46,143.2
/// ```
pub fn write_metrics_csv<W: Write>(metrics: &Metrics, writer: &mut W) -> Result<()> {
    writeln!(writer, "Phase,THD_percent,RMS,Peak")?;
    for (name, m) in [
        ("a", &metrics.a),
        ("b", &metrics.b),
        ("c", &metrics.c),
        ("n", &metrics.n),
    ] {
        writeln!(writer, "{},{},{},{}", name, m.thd, m.rms, m.peak)?;
    }
    Ok(())
}

/// Write phasors as CSV, followed by the sequence components when present.
///
/// Format:
/// ```csv
/// Quantity,Magnitude,Angle_deg
/// Ia,100,0
/// Direct,100,0
/// ```
pub fn write_phasors_csv<W: Write>(phasors: &PhasorData, writer: &mut W) -> Result<()> {
    writeln!(writer, "Quantity,Magnitude,Angle_deg")?;
    let mut row = |name: &str, p: &Phasor| -> Result<()> {
        writeln!(writer, "{},{},{}", name, p.magnitude, p.angle_degrees())?;
        Ok(())
    };
    row("Ia", &phasors.ia)?;
    row("Ib", &phasors.ib)?;
    row("Ic", &phasors.ic)?;
    row("In", &phasors.in_)?;
    if let Some(seq) = &phasors.sequences {
        row("Direct", &seq.direct)?;
        row("Inverse", &seq.inverse)?;
        row("Homopolar", &seq.homopolar)?;
    }
    Ok(())
}

/// Write a harmonic spectrum with both classifications. Phases are
/// normalized to (-π, π].
///
/// Format:
/// ```csv
/// k,Amplitude,Phase_rad,Enabled,Sequence,Class
/// 5,20,0,true,inverse,negative
/// ```
pub fn write_spectrum_csv<W: Write>(harmonics: &[Harmonic], writer: &mut W) -> Result<()> {
    writeln!(writer, "k,Amplitude,Phase_rad,Enabled,Sequence,Class")?;
    for h in harmonics {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            h.order,
            h.amplitude,
            normalize_phase(h.phase),
            h.enabled,
            SequenceKind::of(h.order).as_str(),
            SpectrumClass::of(h.order).as_str()
        )?;
    }
    Ok(())
}

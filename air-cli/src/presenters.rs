//! Apresentadores de terminal: bloco serial e display LCD 20x4

use std::io::Write;

use colored::*;

use air_core::prelude::*;

/// Largura do LCD
pub const LCD_COLS: usize = 20;

/// Pinta a faixa (ou devolve o texto puro)
pub fn paint_band(band: SeverityBand, color: bool) -> String {
    if !color {
        return band.to_string();
    }
    match band {
        SeverityBand::Safe => band.to_string().green().to_string(),
        SeverityBand::Moderate => band.to_string().yellow().bold().to_string(),
        SeverityBand::Hazard => band.to_string().red().bold().to_string(),
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Valor no formato do monitor serial
fn format_value(parameter: ParameterId, value: f32) -> String {
    match parameter {
        ParameterId::Temperature => format!("{:.1}C", value),
        ParameterId::Humidity => format!("{:.1}%", value),
        _ => format!("{:.0}", value),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERIAL
// ═══════════════════════════════════════════════════════════════════════════════

/// Bloco `=== SENSOR READINGS ===` / `=== ACTUATORS ===` a cada ciclo
pub struct SerialPresenter<W: Write + Send> {
    out: W,
    color: bool,
}

impl<W: Write + Send> SerialPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, cycle: u64, reading: &Reading, evaluation: &Evaluation) -> String {
        let mut text = format!("=== SENSOR READINGS (cycle {}) ===\n", cycle);
        for (parameter, band) in evaluation.classification.iter() {
            let value = reading
                .get(parameter)
                .map(|v| format_value(parameter, v))
                .unwrap_or_else(|| "--".to_string());
            text.push_str(&format!(
                "{}:{} [{}]\n",
                parameter.label(),
                value,
                paint_band(band, self.color)
            ));
        }
        text.push_str("=== ACTUATORS ===\n");
        for kind in ActuatorKind::ALL {
            text.push_str(&format!(
                "{}:{}\n",
                kind.label(),
                on_off(evaluation.actuators.get(kind))
            ));
        }
        text
    }
}

impl<W: Write + Send> Presenter for SerialPresenter<W> {
    fn present(
        &mut self,
        cycle: u64,
        reading: &Reading,
        evaluation: &Evaluation,
    ) -> Result<(), PresenterError> {
        let text = self.render(cycle, reading, evaluation);
        writeln!(self.out, "{}", text)
            .and_then(|_| self.out.flush())
            .map_err(|e| PresenterError::Unavailable(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LCD
// ═══════════════════════════════════════════════════════════════════════════════

/// Quatro linhas de 20 colunas, como o LCD I2C do protótipo
pub fn lcd_lines(reading: &Reading, evaluation: &Evaluation) -> [String; 4] {
    let value = |p: ParameterId| {
        reading
            .get(p)
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "--".into())
    };
    let band = |p: ParameterId| {
        evaluation
            .classification
            .band(p)
            .map(|b| b.as_str().to_string())
            .unwrap_or_else(|| "--".into())
    };
    let temperature = reading
        .get(ParameterId::Temperature)
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "--".into());

    let actuators = evaluation.actuators;
    let mut status = if actuators.alarm { "ALARM:ON " } else { "ALARM:OFF" }.to_string();
    if actuators.fan {
        status.push_str(" FAN");
    }
    if actuators.vent {
        status.push_str(" VENT");
    }

    [
        format!("PM:{} CO:{}", value(ParameterId::Pm25), value(ParameterId::Co)),
        format!("T:{}C H:{}%", temperature, value(ParameterId::Humidity)),
        format!("PM:{} CO:{}", band(ParameterId::Pm25), band(ParameterId::Co)),
        status,
    ]
    .map(|line| fit_lcd(&line))
}

/// Trunca ou completa com espaços até a largura do LCD
pub fn fit_lcd(line: &str) -> String {
    let mut fitted: String = line.chars().take(LCD_COLS).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat_n(' ', LCD_COLS - len));
    fitted
}

/// Desenha o LCD com moldura
pub struct LcdPresenter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> LcdPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Presenter for LcdPresenter<W> {
    fn present(
        &mut self,
        _cycle: u64,
        reading: &Reading,
        evaluation: &Evaluation,
    ) -> Result<(), PresenterError> {
        let border = format!("+{}+", "-".repeat(LCD_COLS));
        let mut text = format!("{}\n", border);
        for line in lcd_lines(reading, evaluation) {
            text.push_str(&format!("|{}|\n", line));
        }
        text.push_str(&border);

        writeln!(self.out, "{}", text)
            .and_then(|_| self.out.flush())
            .map_err(|e| PresenterError::RenderFailed(e.to_string()))
    }
}

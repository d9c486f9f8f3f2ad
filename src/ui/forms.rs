use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{CropRecord, NewCropRecord, RecordId};

/// Editable fields of the crop form, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum CropField {
    #[default]
    CropName,
    PlantingDate,
    HarvestDate,
    Yield,
    FixedCost,
    VariableCost,
    Revenue,
    Profit,
}

impl CropField {
    pub(crate) const ALL: [CropField; 8] = [
        CropField::CropName,
        CropField::PlantingDate,
        CropField::HarvestDate,
        CropField::Yield,
        CropField::FixedCost,
        CropField::VariableCost,
        CropField::Revenue,
        CropField::Profit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            CropField::CropName => "Crop Name",
            CropField::PlantingDate => "Planting Date",
            CropField::HarvestDate => "Harvest Date",
            CropField::Yield => "Yield",
            CropField::FixedCost => "Fixed Cost",
            CropField::VariableCost => "Variable Cost",
            CropField::Revenue => "Revenue",
            CropField::Profit => "Profit",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    /// Following field, wrapping from the last back to the first.
    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding field, wrapping from the first to the last.
    pub(crate) fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

/// Width reserved for field labels so the values line up in one column.
pub(crate) const LABEL_WIDTH: usize = 15;

/// State of the crop form: the eight text values, which one has focus, and
/// the id of the record they were loaded from (if any).
#[derive(Default, Clone, Debug)]
pub(crate) struct CropForm {
    pub(crate) values: NewCropRecord,
    pub(crate) record_id: Option<RecordId>,
    pub(crate) active: CropField,
}

impl CropForm {
    /// Replace every value with those of a stored record.
    pub(crate) fn load(&mut self, record: &CropRecord) {
        self.values = record.fields.clone();
        self.record_id = Some(record.id);
    }

    /// Blank every field and detach the form from any stored record. Focus
    /// goes back to the first field.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot of the values, ready for `insert_record`.
    pub(crate) fn to_new_record(&self) -> NewCropRecord {
        self.values.clone()
    }

    pub(crate) fn value(&self, field: CropField) -> &str {
        let values = &self.values;
        match field {
            CropField::CropName => &values.crop_name,
            CropField::PlantingDate => &values.planting_date,
            CropField::HarvestDate => &values.harvest_date,
            CropField::Yield => &values.yield_amount,
            CropField::FixedCost => &values.fixed_cost,
            CropField::VariableCost => &values.variable_cost,
            CropField::Revenue => &values.revenue,
            CropField::Profit => &values.profit,
        }
    }

    fn value_mut(&mut self, field: CropField) -> &mut String {
        let values = &mut self.values;
        match field {
            CropField::CropName => &mut values.crop_name,
            CropField::PlantingDate => &mut values.planting_date,
            CropField::HarvestDate => &mut values.harvest_date,
            CropField::Yield => &mut values.yield_amount,
            CropField::FixedCost => &mut values.fixed_cost,
            CropField::VariableCost => &mut values.variable_cost,
            CropField::Revenue => &mut values.revenue,
            CropField::Profit => &mut values.profit,
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active field. Any printable character is
    /// accepted, including in the numeric fields.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Slice of `field` that fits in `width` columns after the label, plus
    /// the column (counted from the start of the line) where the text cursor
    /// belongs. The active field scrolls so its end stays visible; other
    /// fields are cut off on the right.
    pub(crate) fn visible_value(&self, field: CropField, width: usize) -> (String, usize) {
        let value = self.value(field);
        let room = width.saturating_sub(LABEL_WIDTH);
        let len = value.chars().count();

        if self.active != field {
            return (value.chars().take(room).collect(), LABEL_WIDTH + len.min(room));
        }
        if len < room {
            return (value.to_string(), LABEL_WIDTH + len);
        }

        // Keep the last column free for the cursor.
        let shown = room.saturating_sub(1);
        let tail: String = value.chars().skip(len - shown).collect();
        let column = (LABEL_WIDTH + shown).min(width.saturating_sub(1));
        (tail, column)
    }

    /// Render a single `Label: value` line, at most `width` columns wide.
    pub(crate) fn build_line(&self, field: CropField, width: usize) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() && !is_active {
            "<empty>".to_string()
        } else {
            self.visible_value(field, width).0
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH)),
            Span::styled(display, style),
        ])
    }
}

/// Pending delete waiting for the user to confirm.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: RecordId,
    pub(crate) crop_name: String,
}

impl ConfirmDelete {
    pub(crate) fn from_form(id: RecordId, form: &CropForm) -> Self {
        Self {
            id,
            crop_name: form.values.crop_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = CropForm::default();
        assert_eq!(form.active, CropField::CropName);

        form.focus_previous();
        assert_eq!(form.active, CropField::Profit);
        form.focus_next();
        assert_eq!(form.active, CropField::CropName);

        for _ in 0..CropField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.active, CropField::CropName);
    }

    #[test]
    fn typing_targets_the_active_field() {
        let mut form = CropForm::default();
        for ch in "Wheat".chars() {
            assert!(form.push_char(ch));
        }
        form.focus_next();
        form.focus_next();
        form.focus_next();
        for ch in "ten-ish".chars() {
            form.push_char(ch);
        }
        form.backspace();
        assert!(!form.push_char('\n'));

        let record = form.to_new_record();
        assert_eq!(record.crop_name, "Wheat");
        assert_eq!(record.yield_amount, "ten-is");
        assert_eq!(form.visible_value(CropField::Yield, 80).1, LABEL_WIDTH + 6);
    }

    #[test]
    fn active_field_scrolls_to_keep_its_end_visible() {
        let mut form = CropForm::default();
        form.values.crop_name = "abcdefghij".repeat(3);

        let (shown, column) = form.visible_value(CropField::CropName, LABEL_WIDTH + 10);
        assert_eq!(shown, "bcdefghij");
        assert_eq!(column, LABEL_WIDTH + 9);

        let (shown, column) = form.visible_value(CropField::CropName, LABEL_WIDTH + 40);
        assert_eq!(shown.chars().count(), 30);
        assert_eq!(column, LABEL_WIDTH + 30);
    }

    #[test]
    fn inactive_fields_are_cut_off_on_the_right() {
        let mut form = CropForm::default();
        form.values.revenue = "1234567890".to_string();

        let (shown, column) = form.visible_value(CropField::Revenue, LABEL_WIDTH + 4);
        assert_eq!(shown, "1234");
        assert_eq!(column, LABEL_WIDTH + 4);
    }

    #[test]
    fn narrow_widths_never_place_the_cursor_past_the_line() {
        let mut form = CropForm::default();
        form.values.crop_name = "x".repeat(70_000);

        let (shown, column) = form.visible_value(CropField::CropName, 5);
        assert!(shown.is_empty());
        assert_eq!(column, 4);
    }

    #[test]
    fn load_and_clear_carry_every_field() {
        let stored = CropRecord {
            id: 4,
            fields: NewCropRecord {
                crop_name: "Soy".into(),
                planting_date: "2024-04-01".into(),
                harvest_date: "2024-09-30".into(),
                yield_amount: "55".into(),
                fixed_cost: "100".into(),
                variable_cost: "40".into(),
                revenue: "300".into(),
                profit: "160".into(),
            },
        };
        let mut form = CropForm::default();
        form.active = CropField::Revenue;
        form.load(&stored);

        assert_eq!(form.record_id, Some(4));
        assert_eq!(form.to_new_record(), stored.fields);
        for field in CropField::ALL {
            assert!(!form.value(field).is_empty(), "{} was empty", field.label());
        }

        form.clear();
        assert_eq!(form.record_id, None);
        assert_eq!(form.active, CropField::CropName);
        assert_eq!(form.to_new_record(), NewCropRecord::default());
    }
}

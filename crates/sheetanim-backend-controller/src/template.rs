//! Seeding a controller from a template controller.

use sheetanim_spec::{Controller, TemplateMode, TransferReport};

use crate::transfer::{copy_parameters, transfer_between_controllers, TransferMode, TransferOptions};

/// Imports a template into `controller`.
///
/// [`TemplateMode::Parameters`] adds missing parameters only.
/// [`TemplateMode::Full`] runs a lenient, non-resetting transfer, which also
/// brings transitions, positions and default states, creating any state the
/// controller lacks. Existing parameters are never overwritten.
pub fn seed_from_template(
    controller: &mut Controller,
    template: &Controller,
    mode: TemplateMode,
) -> TransferReport {
    match mode {
        TemplateMode::Parameters => {
            let copied = copy_parameters(template, controller);
            log::info!(
                "imported {} parameter(s) from template '{}'",
                copied,
                template.name
            );
            TransferReport {
                parameters_copied: copied,
                ..TransferReport::default()
            }
        }
        TemplateMode::Full => {
            let options = TransferOptions {
                mode: TransferMode::Lenient,
                reset_destination_first: false,
            };
            transfer_between_controllers(template, controller, &options)
        }
    }
}

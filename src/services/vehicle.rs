//! Vehicle use cases, including the picture upload.

use crate::domain::vehicle::{Vehicle, VehicleDraft};
use crate::forms::query::ListQueryForm;
use crate::forms::vehicle::{SaveVehicleForm, VehicleUpload};
use crate::repository::{EntityReader, EntityWriter, FileStore};
use crate::services::entity::{
    Page, delete_existing, ensure_exists, find_by_id, list_entities, save_draft,
};
use crate::services::{ServiceError, ServiceResult};

pub fn list_vehicles<R>(repo: &R, form: ListQueryForm) -> ServiceResult<Page<Vehicle>>
where
    R: EntityReader<Vehicle> + ?Sized,
{
    list_entities(repo, form)
}

pub fn get_vehicle<R>(repo: &R, id: i32) -> ServiceResult<Vehicle>
where
    R: EntityReader<Vehicle> + ?Sized,
{
    find_by_id(repo, id)
}

/// Saves a vehicle from its JSON payload; a stored picture is kept.
pub fn save_vehicle<R>(repo: &R, form: SaveVehicleForm) -> ServiceResult<Vehicle>
where
    R: EntityReader<Vehicle> + EntityWriter<Vehicle> + ?Sized,
{
    let draft = VehicleDraft::try_from(form)?;
    if let Some(id) = draft.id {
        ensure_exists::<Vehicle, _>(repo, id)?;
    }
    save_draft::<Vehicle, _>(repo, &draft)
}

/// Stores the uploaded picture, then saves the vehicle pointing at it.
pub fn upload_vehicle<R, F>(repo: &R, store: &F, upload: VehicleUpload) -> ServiceResult<Vehicle>
where
    R: EntityReader<Vehicle> + EntityWriter<Vehicle> + ?Sized,
    F: FileStore + ?Sized,
{
    let mut draft = upload.draft;
    if let Some(id) = draft.id {
        ensure_exists::<Vehicle, _>(repo, id)?;
    }

    let file_name = store.store(&upload.source, &upload.extension)?;
    log::info!("Stored vehicle picture {file_name}");
    draft.img_path = Some(file_name.clone());

    save_draft::<Vehicle, _>(repo, &draft).inspect_err(|_| {
        if let Err(err) = store.remove(&file_name) {
            log::warn!("Failed to remove orphaned picture {file_name}: {err}");
        }
    })
}

/// Returns the stored picture file name of a vehicle.
///
/// A name whose file is gone from the store counts as no picture.
pub fn get_vehicle_image<R, F>(repo: &R, store: &F, id: i32) -> ServiceResult<String>
where
    R: EntityReader<Vehicle> + ?Sized,
    F: FileStore + ?Sized,
{
    let no_image = || ServiceError::NotFound(format!("vehicle with ID {id} has no image"));

    let file_name = get_vehicle(repo, id)?.img_path.ok_or_else(no_image)?;
    if !store.path_of(&file_name).is_file() {
        log::warn!("Picture {file_name} of vehicle {id} is missing from the store");
        return Err(no_image());
    }
    Ok(file_name)
}

pub fn delete_vehicle<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: EntityReader<Vehicle> + EntityWriter<Vehicle> + ?Sized,
{
    delete_existing::<Vehicle, _>(repo, id)
}

use anchor_lang::prelude::*;

/// Deserializes a program account that may not have been created yet.
/// Returns `None` for an empty account so readers can treat it as zeroed.
pub fn load_if_initialized<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram);
    let data = info.try_borrow_data()?;
    let account = T::try_deserialize(&mut &data[..])?;
    Ok(Some(account))
}

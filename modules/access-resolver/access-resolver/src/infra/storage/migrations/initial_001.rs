use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Principals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Principals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Principals::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Principals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Organizations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Organizations::IsGloballyPrivileged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Buildings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Buildings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Buildings::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Buildings::Name).string().not_null())
                    .col(
                        ColumnDef::new(Buildings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buildings_organization")
                            .from(Buildings::Table, Buildings::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Residences::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Residences::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Residences::BuildingId).uuid().not_null())
                    .col(ColumnDef::new(Residences::UnitNumber).string().not_null())
                    .col(
                        ColumnDef::new(Residences::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_residences_building")
                            .from(Residences::Table, Residences::BuildingId)
                            .to(Buildings::Table, Buildings::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganizationMemberships::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrganizationMemberships::PrincipalId).uuid().not_null())
                    .col(
                        ColumnDef::new(OrganizationMemberships::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationMemberships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(OrganizationMemberships::CanAccessAllOrganizations)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrganizationMemberships::PrincipalId)
                            .col(OrganizationMemberships::OrganizationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_org_memberships_principal")
                            .from(
                                OrganizationMemberships::Table,
                                OrganizationMemberships::PrincipalId,
                            )
                            .to(Principals::Table, Principals::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_org_memberships_organization")
                            .from(
                                OrganizationMemberships::Table,
                                OrganizationMemberships::OrganizationId,
                            )
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ResidenceMemberships::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ResidenceMemberships::PrincipalId).uuid().not_null())
                    .col(ColumnDef::new(ResidenceMemberships::ResidenceId).uuid().not_null())
                    .col(
                        ColumnDef::new(ResidenceMemberships::RelationshipType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResidenceMemberships::StartDate).date())
                    .col(ColumnDef::new(ResidenceMemberships::EndDate).date())
                    .col(
                        ColumnDef::new(ResidenceMemberships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .primary_key(
                        Index::create()
                            .col(ResidenceMemberships::PrincipalId)
                            .col(ResidenceMemberships::ResidenceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_residence_memberships_principal")
                            .from(ResidenceMemberships::Table, ResidenceMemberships::PrincipalId)
                            .to(Principals::Table, Principals::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_residence_memberships_residence")
                            .from(ResidenceMemberships::Table, ResidenceMemberships::ResidenceId)
                            .to(Residences::Table, Residences::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups the resolver issues on every request.
        manager
            .create_index(
                Index::create()
                    .name("idx_buildings_organization_id")
                    .table(Buildings::Table)
                    .col(Buildings::OrganizationId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_residences_building_id")
                    .table(Residences::Table)
                    .col(Residences::BuildingId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_name")
                    .table(Organizations::Table)
                    .col(Organizations::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResidenceMemberships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrganizationMemberships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Residences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Buildings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Principals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
    Role,
    IsActive,
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    IsActive,
    IsGloballyPrivileged,
}

#[derive(DeriveIden)]
enum Buildings {
    Table,
    Id,
    OrganizationId,
    Name,
    IsActive,
}

#[derive(DeriveIden)]
enum Residences {
    Table,
    Id,
    BuildingId,
    UnitNumber,
    IsActive,
}

#[derive(DeriveIden)]
enum OrganizationMemberships {
    Table,
    PrincipalId,
    OrganizationId,
    IsActive,
    CanAccessAllOrganizations,
}

#[derive(DeriveIden)]
enum ResidenceMemberships {
    Table,
    PrincipalId,
    ResidenceId,
    RelationshipType,
    StartDate,
    EndDate,
    IsActive,
}
